// Controller HTTP client
//
// Wraps `reqwest::Client` with versioned URL construction, the
// `X-Auth-Token` header, and response decoding. Endpoint groups (auth,
// tenant collections) are implemented as inherent methods in separate files
// to keep this module focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const AUTH_HEADER: &str = "X-Auth-Token";
const PREVIEW_CHARS: usize = 200;

/// HTTP client for the CloudGenix controller.
///
/// Holds the session state established by [`use_token`](Self::use_token) or
/// [`login`](Self::login): the auth token (if the controller issued one) and
/// the tenant id that scopes every collection endpoint.
pub struct CgxClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
    tenant_id: RwLock<Option<String>>,
}

impl CgxClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is added when the config has none, since interactive
    /// logins may hand back a session cookie instead of a token.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
            tenant_id: RwLock::new(None),
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Session state ────────────────────────────────────────────────

    /// Tenant id of the authenticated session, if any.
    pub fn tenant_id(&self) -> Option<String> {
        self.tenant_id.read().expect("tenant lock poisoned").clone()
    }

    /// Whether an auth token is currently attached to requests.
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    pub(crate) fn set_token(&self, token: Option<SecretString>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    pub(crate) fn set_tenant_id(&self, tenant_id: Option<String>) {
        *self.tenant_id.write().expect("tenant lock poisoned") = tenant_id;
    }

    /// Drop the token and tenant id. Cookies, if any, are left to expire.
    pub fn clear_session(&self) {
        debug!("clearing session state");
        self.set_token(None);
        self.set_tenant_id(None);
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{version}/api/{path}`
    pub(crate) fn api_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{version}/api/{path}"))?)
    }

    /// `{base}/{version}/api/tenants/{tenant_id}/{path}`
    pub(crate) fn tenant_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let tenant_id = self.tenant_id().ok_or(Error::NotAuthenticated)?;
        let path = if path.is_empty() {
            format!("tenants/{tenant_id}")
        } else {
            format!("tenants/{tenant_id}/{path}")
        };
        self.api_url(version, &path)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.header(AUTH_HEADER, token.expose_secret()),
            None => builder,
        }
    }

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let body = self.send(self.authorize(self.http.get(url))).await?;
        decode(&body)
    }

    /// Send a PUT request with a JSON body and decode the response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let body = self
            .send(self.authorize(self.http.put(url).json(body)))
            .await?;
        decode(&body)
    }

    /// Send a request, returning the raw body of a 2xx response.
    ///
    /// Any other status becomes `Error::Api` carrying the controller's error
    /// payload, parsed as JSON when possible.
    pub(crate) async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, Error> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, body = %preview(&body), "response");

        if status.is_success() {
            return Ok(body);
        }

        let payload = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
        Err(Error::Api {
            status: status.as_u16(),
            body: payload,
        })
    }
}

/// Decode a JSON body, keeping the raw text on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}
