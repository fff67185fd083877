// ── Credential resolution and authentication ──
//
// Sources are consulted in a fixed order and only the first one present is
// used: command-line token, token file, X_AUTH_TOKEN, AUTH_TOKEN, then an
// interactive login loop.

use std::fmt;
use std::path::PathBuf;

use secrecy::SecretString;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::prompt::{Prompter, prompt_login};
use crate::session::Authenticator;

/// Environment variables checked for a token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["X_AUTH_TOKEN", "AUTH_TOKEN"];

/// Where a token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    CommandLine,
    File(PathBuf),
    Environment(&'static str),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine => f.write_str("Auth-Token from command line"),
            Self::File(path) => write!(f, "Auth-Token from file {}", path.display()),
            Self::Environment(name) => write!(f, "environment variable {name}"),
        }
    }
}

/// The one credential chosen for this run.
#[derive(Debug)]
pub enum Credential {
    Token {
        token: SecretString,
        source: TokenSource,
    },
    Interactive,
}

impl Credential {
    pub fn describe(&self) -> String {
        match self {
            Self::Token { source, .. } => source.to_string(),
            Self::Interactive => "interactive login".into(),
        }
    }
}

/// Token inputs from the command line.
#[derive(Debug, Default)]
pub struct CredentialSources {
    pub token: Option<String>,
    pub token_file: Option<PathBuf>,
}

impl CredentialSources {
    /// Resolve against the process environment.
    pub fn resolve(self) -> Result<Credential, CoreError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with an injectable environment lookup.
    ///
    /// Empty tokens on the command line or in the environment count as
    /// absent. A token file, once named, is always the source; an empty file
    /// is an error rather than a fall-through.
    pub fn resolve_with(
        self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Credential, CoreError> {
        if let Some(token) = self.token.filter(|t| !t.trim().is_empty()) {
            return Ok(Credential::Token {
                token: SecretString::from(token.trim().to_owned()),
                source: TokenSource::CommandLine,
            });
        }

        if let Some(path) = self.token_file {
            let contents = std::fs::read_to_string(&path).map_err(|source| CoreError::TokenFile {
                path: path.clone(),
                source,
            })?;
            let token = contents.trim();
            if token.is_empty() {
                return Err(CoreError::AuthenticationFailed {
                    message: format!("auth token file {} is empty", path.display()),
                });
            }
            return Ok(Credential::Token {
                token: SecretString::from(token.to_owned()),
                source: TokenSource::File(path),
            });
        }

        for name in TOKEN_ENV_VARS {
            if let Some(token) = env(name).filter(|t| !t.trim().is_empty()) {
                return Ok(Credential::Token {
                    token: SecretString::from(token.trim().to_owned()),
                    source: TokenSource::Environment(name),
                });
            }
        }

        Ok(Credential::Interactive)
    }
}

/// Establish a session and return its tenant id.
///
/// A token gets exactly one attempt. Interactive login repeats until a
/// tenant id comes back, clearing session state between attempts; it only
/// stops early if the prompter itself fails (e.g. stdin closed).
pub async fn authenticate<A, P>(
    auth: &A,
    credential: Credential,
    prompter: &mut P,
) -> Result<String, CoreError>
where
    A: Authenticator,
    P: Prompter,
{
    match credential {
        Credential::Token { token, source } => {
            info!(%source, "authenticating with auth token");
            match auth.authenticate_token(token).await {
                Ok(Some(tenant_id)) => Ok(tenant_id),
                Ok(None) => Err(CoreError::AuthenticationFailed {
                    message: format!("token from {source} returned no tenant, please check token"),
                }),
                Err(e) => Err(CoreError::AuthenticationFailed {
                    message: format!("token from {source} was rejected: {e}"),
                }),
            }
        }
        Credential::Interactive => loop {
            let (email, password) = prompt_login(prompter)?;
            match auth.authenticate_login(&email, &password).await {
                Ok(Some(tenant_id)) => return Ok(tenant_id),
                Ok(None) => warn!("login returned no tenant, try again"),
                Err(e) => warn!(error = %e, "login failed, try again"),
            }
            auth.clear_credentials();
        },
    }
}
