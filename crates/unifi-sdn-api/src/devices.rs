// Device endpoints
//
// Device inventory via stat/device. The controller returns every device it
// has seen for the site, including unadopted devices that show up in every
// site; filtering is the caller's job.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::RawDevice;

/// Path of the device inventory for `site` (the site's short code).
pub fn site_devices_path(site: &str) -> String {
    format!("/api/s/{site}/stat/device")
}

impl ApiClient {
    /// List all devices with full statistics.
    ///
    /// `GET /api/s/{site}/stat/device`
    pub async fn list_devices(&self, site: &str) -> Result<Vec<RawDevice>, Error> {
        debug!(site, "fetching device statistics");
        Ok(self.get(&site_devices_path(site)).await?.data)
    }
}
