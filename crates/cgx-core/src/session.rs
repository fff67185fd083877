// ── Controller session seams ──
//
// The workflow talks to the controller only through these traits so it can
// run against an in-memory session in tests. `CgxClient` implements both.

use secrecy::SecretString;

use cgx_api::{CgxClient, Error, Site, Tenant, WanInterface, WanInterfaceLabel};

/// Collection operations the bulk update needs.
#[allow(async_fn_in_trait)]
pub trait ControllerSession {
    async fn fetch_tenant(&self) -> Result<Tenant, Error>;

    async fn fetch_wan_interface_labels(&self) -> Result<Vec<WanInterfaceLabel>, Error>;

    async fn fetch_sites(&self) -> Result<Vec<Site>, Error>;

    async fn fetch_wan_interfaces(&self, site_id: &str) -> Result<Vec<WanInterface>, Error>;

    /// Replace-style update of one interface.
    async fn submit_wan_interface(
        &self,
        site_id: &str,
        interface: &WanInterface,
    ) -> Result<(), Error>;

    /// End the session. Called exactly once per run.
    async fn release(&self) -> Result<(), Error>;
}

/// Ways of turning a credential into a tenant id.
///
/// Both methods return `Ok(None)` when the controller answered but reported
/// no tenant, which counts as a failed login.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    async fn authenticate_token(&self, token: SecretString) -> Result<Option<String>, Error>;

    async fn authenticate_login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Option<String>, Error>;

    /// Forget any partially established credentials.
    fn clear_credentials(&self);
}

impl ControllerSession for CgxClient {
    async fn fetch_tenant(&self) -> Result<Tenant, Error> {
        self.tenant().await
    }

    async fn fetch_wan_interface_labels(&self) -> Result<Vec<WanInterfaceLabel>, Error> {
        self.wan_interface_labels().await
    }

    async fn fetch_sites(&self) -> Result<Vec<Site>, Error> {
        self.sites().await
    }

    async fn fetch_wan_interfaces(&self, site_id: &str) -> Result<Vec<WanInterface>, Error> {
        self.wan_interfaces(site_id).await
    }

    async fn submit_wan_interface(
        &self,
        site_id: &str,
        interface: &WanInterface,
    ) -> Result<(), Error> {
        self.replace_wan_interface(site_id, &interface.id, interface)
            .await
            .map(|_| ())
    }

    async fn release(&self) -> Result<(), Error> {
        self.logout().await
    }
}

impl Authenticator for CgxClient {
    async fn authenticate_token(&self, token: SecretString) -> Result<Option<String>, Error> {
        self.use_token(token).await
    }

    async fn authenticate_login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Option<String>, Error> {
        self.login(email, password).await
    }

    fn clear_credentials(&self) {
        self.clear_session();
    }
}
