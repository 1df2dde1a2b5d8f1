// Controller-level endpoints
//
// `GET /status` is served without authentication on most controllers and
// carries the version in the envelope's `meta`, not in `data`.

use serde::de::IgnoredAny;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

/// `GET /status`
pub const STATUS_PATH: &str = "/status";

/// Controller status as reported in the `/status` envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerStatus {
    /// Empty when the controller omits it.
    pub server_version: String,
    pub up: bool,
}

impl ApiClient {
    /// Fetch the controller status.
    pub async fn status(&self) -> Result<ControllerStatus, Error> {
        debug!("fetching status");
        let resp = self.get::<IgnoredAny>(STATUS_PATH).await?;
        Ok(ControllerStatus {
            server_version: resp.meta.server_version.unwrap_or_default(),
            up: resp.meta.up.unwrap_or(false),
        })
    }
}
