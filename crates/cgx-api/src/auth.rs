// Session authentication
//
// Two ways in: attach a pre-issued auth token, or log in with email and
// password. Either way the session only counts as authenticated once the
// profile endpoint reports a tenant id.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::{CgxClient, decode};
use crate::error::Error;
use crate::models::{LoginResponse, Profile};

const AUTH_VERSION: &str = "v2.0";

impl CgxClient {
    /// Authenticate with a pre-issued auth token.
    ///
    /// Returns the tenant id from the operator profile, or `None` when the
    /// controller accepted the request but reported no tenant.
    pub async fn use_token(&self, token: SecretString) -> Result<Option<String>, Error> {
        debug!("authenticating with auth token");
        self.set_token(Some(token));
        self.establish_tenant().await
    }

    /// Authenticate with email and password.
    ///
    /// Any previous session state is cleared first. On success the issued
    /// token (or the session cookie) is used for all subsequent requests.
    ///
    /// `POST /v2.0/api/login`
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Option<String>, Error> {
        self.clear_session();

        let url = self.api_url(AUTH_VERSION, "login")?;
        debug!("logging in at {}", url);

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let raw = match self.send(self.http().post(url).json(&body)).await {
            Ok(raw) => raw,
            Err(Error::Api { status, body }) => {
                return Err(Error::Authentication {
                    message: format!("login failed (HTTP {status}): {body}"),
                });
            }
            Err(other) => return Err(other),
        };

        let login: LoginResponse = decode(&raw)?;
        if let Some(token) = login.x_auth_token {
            self.set_token(Some(SecretString::from(token)));
        }

        self.establish_tenant().await
    }

    /// Fetch the operator profile for the current session.
    ///
    /// `GET /v2.0/api/profile`
    pub async fn profile(&self) -> Result<Profile, Error> {
        let url = self.api_url(AUTH_VERSION, "profile")?;
        self.get(url).await
    }

    /// End the current session and clear local state.
    ///
    /// `GET /v2.0/api/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url(AUTH_VERSION, "logout")?;
        debug!("logging out at {}", url);

        let result = self.send(self.authorize(self.http().get(url))).await;
        self.clear_session();
        result.map(|_| ())
    }

    async fn establish_tenant(&self) -> Result<Option<String>, Error> {
        let profile = self.profile().await?;
        let tenant_id = profile.tenant_id.filter(|id| !id.is_empty());
        self.set_tenant_id(tenant_id.clone());
        match &tenant_id {
            Some(id) => debug!(tenant_id = %id, "session authenticated"),
            None => debug!("profile carried no tenant id"),
        }
        Ok(tenant_id)
    }
}
