use thiserror::Error;

/// Top-level error type for the `cgx-api` crate.
///
/// Covers authentication, transport, and controller-reported failures.
/// `cgx-core` maps these into workflow-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or token validation failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A tenant-scoped call was made before a tenant id was established.
    #[error("Not authenticated -- no tenant id on this session")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Controller ──────────────────────────────────────────────────
    /// Non-success response from the controller. `body` is the raw error
    /// payload (JSON when the controller sent JSON, a string otherwise).
    #[error("Controller API error (HTTP {status}): {body}")]
    Api {
        status: u16,
        body: serde_json::Value,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the controller rejected the session credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::NotAuthenticated | Self::Api { status: 401, .. }
        )
    }

    /// The raw controller payload, when this error carries one.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}
