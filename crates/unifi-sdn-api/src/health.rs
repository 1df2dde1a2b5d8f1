// Site health endpoints
//
// The health widget is a per-site summary of wifi utilization and client
// satisfaction.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::RawSiteHealth;

/// Path of the health widget for `site` (the site's short code).
pub fn site_health_path(site: &str) -> String {
    format!("/api/s/{site}/stat/widget/health")
}

impl ApiClient {
    /// Fetch the health widget for `site`.
    ///
    /// `GET /api/s/{site}/stat/widget/health`
    ///
    /// Returned as-is; the endpoint should yield exactly one element and
    /// checking that is left to the caller.
    pub async fn site_health(&self, site: &str) -> Result<Vec<RawSiteHealth>, Error> {
        debug!(site, "fetching health info");
        Ok(self.get(&site_health_path(site)).await?.data)
    }
}
