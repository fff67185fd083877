// Tenant-scoped collection endpoints
//
// Each resource is pinned to the API version its schema was written
// against; the controller serves several versions side by side.

use tracing::debug;

use crate::client::CgxClient;
use crate::error::Error;
use crate::models::{ListResponse, Site, Tenant, WanInterface, WanInterfaceLabel};

const TENANT_VERSION: &str = "v2.0";
const WAN_LABEL_VERSION: &str = "v2.0";
const SITE_VERSION: &str = "v4.7";
const WAN_INTERFACE_VERSION: &str = "v2.7";

impl CgxClient {
    /// Fetch the session's tenant.
    ///
    /// `GET /v2.0/api/tenants/{tenant_id}`
    pub async fn tenant(&self) -> Result<Tenant, Error> {
        let url = self.tenant_url(TENANT_VERSION, "")?;
        self.get(url).await
    }

    /// List the tenant's WAN interface labels.
    ///
    /// `GET /v2.0/api/tenants/{tenant_id}/waninterfacelabels`
    pub async fn wan_interface_labels(&self) -> Result<Vec<WanInterfaceLabel>, Error> {
        let url = self.tenant_url(WAN_LABEL_VERSION, "waninterfacelabels")?;
        let resp: ListResponse<WanInterfaceLabel> = self.get(url).await?;
        Ok(resp.items)
    }

    /// List all sites in the tenant.
    ///
    /// `GET /v4.7/api/tenants/{tenant_id}/sites`
    pub async fn sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.tenant_url(SITE_VERSION, "sites")?;
        let resp: ListResponse<Site> = self.get(url).await?;
        Ok(resp.items)
    }

    /// List the WAN interfaces of one site.
    ///
    /// `GET /v2.7/api/tenants/{tenant_id}/sites/{site_id}/waninterfaces`
    pub async fn wan_interfaces(&self, site_id: &str) -> Result<Vec<WanInterface>, Error> {
        let url = self.tenant_url(
            WAN_INTERFACE_VERSION,
            &format!("sites/{site_id}/waninterfaces"),
        )?;
        debug!(site_id, "listing wan interfaces");
        let resp: ListResponse<WanInterface> = self.get(url).await?;
        Ok(resp.items)
    }

    /// Replace a WAN interface with the given full representation.
    ///
    /// `PUT /v2.7/api/tenants/{tenant_id}/sites/{site_id}/waninterfaces/{id}`
    pub async fn replace_wan_interface(
        &self,
        site_id: &str,
        interface_id: &str,
        interface: &WanInterface,
    ) -> Result<WanInterface, Error> {
        let url = self.tenant_url(
            WAN_INTERFACE_VERSION,
            &format!("sites/{site_id}/waninterfaces/{interface_id}"),
        )?;
        debug!(site_id, interface_id, "replacing wan interface");
        self.put(url, interface).await
    }
}
