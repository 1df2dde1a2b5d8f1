// Site endpoints
//
// Site listing is controller-scoped (not site-scoped), using
// `/api/self/sites` rather than the usual `/api/s/{site}/...` pattern.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::RawSite;

/// `GET /api/self/sites`
pub const SITES_PATH: &str = "/api/self/sites";

impl ApiClient {
    /// List all sites visible to the authenticated user.
    pub async fn list_sites(&self) -> Result<Vec<RawSite>, Error> {
        debug!("listing sites");
        Ok(self.get(SITES_PATH).await?.data)
    }
}
