// ── Core error types ──
//
// Workflow-level errors. Callers see which stage failed and the raw
// controller payload where there is one; HTTP details stay in cgx-api.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot read auth token file {}: {source}", path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Discovery ────────────────────────────────────────────────────
    #[error("API call failure when enumerating tenant: {payload}")]
    TenantUnavailable { payload: String },

    #[error("API call failure when enumerating sites in tenant: {payload}")]
    SitesUnavailable { payload: String },

    // ── Interaction ──────────────────────────────────────────────────
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    // ── API errors (wrapped) ─────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },
}

impl CoreError {
    /// Render the raw payload of an API error for display.
    ///
    /// JSON payloads are pretty-printed; anything else falls back to the
    /// error's own message.
    pub fn payload_text(err: &cgx_api::Error) -> String {
        match err.payload() {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            None => err.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cgx_api::Error> for CoreError {
    fn from(err: cgx_api::Error) -> Self {
        match err {
            cgx_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cgx_api::Error::NotAuthenticated => CoreError::AuthenticationFailed {
                message: "session has no tenant id".into(),
            },
            cgx_api::Error::Api { status, ref body } => CoreError::Api {
                message: body.to_string(),
                status: Some(status),
            },
            other => CoreError::Api {
                message: other.to_string(),
                status: None,
            },
        }
    }
}
