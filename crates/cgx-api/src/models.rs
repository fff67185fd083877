// Controller API response types
//
// Collection endpoints wrap their payload as `{ "items": [...] }`. Fields use
// `#[serde(default)]` liberally and everything not modelled lands in `extra`,
// so a fetched object can be sent back unchanged in a replace-style PUT.

use serde::{Deserialize, Serialize};

// ── Envelopes ────────────────────────────────────────────────────────

/// Collection envelope returned by list endpoints.
///
/// ```json
/// { "_etag": 1, "count": 2, "items": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Body of a successful `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Present for token-issuing logins; cookie-backed logins omit it.
    #[serde(default)]
    pub x_auth_token: Option<String>,
}

// ── Identity ─────────────────────────────────────────────────────────

/// Operator profile from `GET /profile`. The tenant id is what proves a
/// session is authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Tenant object from `GET /tenants/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Sites ────────────────────────────────────────────────────────────

/// Site object from `GET /sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// "HUB" for data-center sites, "SPOKE" for branches.
    #[serde(default)]
    pub element_cluster_role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── WAN ──────────────────────────────────────────────────────────────

/// Tenant-wide WAN interface label (circuit category).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WanInterfaceLabel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Site WAN interface (circuit).
///
/// `lqm_enabled` is kept as a raw JSON value: the controller reports it as
/// a boolean but it is written back as the string `"true"`/`"false"`.
///
/// Modelled fields always serialize, `None` as `null`, so a replace-style
/// PUT never drops a key the controller sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WanInterface {
    pub id: String,
    /// Circuit name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label_id: Option<String>,
    #[serde(default)]
    pub bfd_mode: Option<String>,
    #[serde(default)]
    pub lqm_enabled: Option<serde_json::Value>,
    #[serde(default)]
    pub bw_config_mode: Option<String>,
    /// Catch-all for the rest of the payload (`_etag`, `_schema`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
