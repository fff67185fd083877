//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use cgx_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cgx::auth_failed),
        help(
            "Check the auth token, or unset --token, --authtokenfile,\n\
             X_AUTH_TOKEN and AUTH_TOKEN to log in interactively."
        )
    )]
    AuthFailed { message: String },

    #[error("Could not read auth token file {path}")]
    #[diagnostic(code(cgx::token_file))]
    TokenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Discovery ────────────────────────────────────────────────────

    #[error("API call failed while reading the tenant")]
    #[diagnostic(code(cgx::tenant_unavailable), help("Controller response:\n{payload}"))]
    TenantUnavailable { payload: String },

    #[error("API call failed while enumerating sites in the tenant")]
    #[diagnostic(code(cgx::sites_unavailable), help("Controller response:\n{payload}"))]
    SitesUnavailable { payload: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(cgx::api_error))]
    Api { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(cgx::prompt),
        help("Use --yes (-y) and a token source in non-interactive contexts.")
    )]
    Prompt { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cgx::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(cgx::config))]
    Config(Box<figment::Error>),

    #[error(transparent)]
    #[diagnostic(code(cgx::transport))]
    Transport(#[from] cgx_api::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::TokenFile { path, source } => Self::TokenFile {
                path: path.display().to_string(),
                source,
            },
            CoreError::TenantUnavailable { payload } => Self::TenantUnavailable { payload },
            CoreError::SitesUnavailable { payload } => Self::SitesUnavailable { payload },
            CoreError::Prompt { message } => Self::Prompt { message },
            CoreError::Api { message, .. } => Self::Api { message },
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::TokenFile { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::TenantUnavailable { .. }
            | Self::SitesUnavailable { .. }
            | Self::Api { .. }
            | Self::Prompt { .. }
            | Self::Transport(_) => exit_code::GENERAL,
        }
    }
}
