// ── Controller abstraction ──
//
// One configured controller: its authenticated API client and its site
// directory. Cheaply cloneable and shared across concurrent scrapes.

use std::sync::Arc;

use tracing::debug;

use unifi_sdn_api::{ApiClient, Credentials, TransportConfig};

use crate::config::ControllerConfig;
use crate::convert::build_metrics;
use crate::error::CoreError;
use crate::model::{Metrics, Site};
use crate::store::SiteCache;

/// Entry point for consumers.
///
/// Construction does not touch the network: the first call logs in on
/// demand.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    api: ApiClient,
    sites: SiteCache,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone())?;
        let transport = TransportConfig {
            tls: (&config.tls).into(),
            timeout: config.timeout,
            cookie_jar: None,
        };
        let api = ApiClient::new(&config.url, credentials, &transport)?;

        Ok(Self {
            inner: Arc::new(ControllerInner {
                config,
                api,
                sites: SiteCache::new(),
            }),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Scrape target name: the alias, or the URL host.
    pub fn target_name(&self) -> &str {
        self.inner.config.target_name()
    }

    // ── Site directory ───────────────────────────────────────────────

    async fn site_directory(&self) -> Result<Arc<[Site]>, CoreError> {
        let api = &self.inner.api;
        self.inner
            .sites
            .load(|| async {
                let raw = api.list_sites().await?;
                Ok::<_, CoreError>(raw.into_iter().map(Site::from).collect())
            })
            .await
    }

    /// All sites, in controller order.
    pub async fn sites(&self) -> Result<Vec<Site>, CoreError> {
        Ok(self.site_directory().await?.to_vec())
    }

    /// Find a site by short code, then by display name. Case-sensitive.
    pub async fn resolve_site(&self, identifier: &str) -> Result<Site, CoreError> {
        let sites = self.site_directory().await?;
        sites
            .iter()
            .find(|s| s.name == identifier)
            .or_else(|| sites.iter().find(|s| s.desc == identifier))
            .cloned()
            .ok_or_else(|| CoreError::SiteNotFound {
                site: identifier.to_owned(),
            })
    }

    // ── Metrics ──────────────────────────────────────────────────────

    /// Collect a point-in-time snapshot of one site.
    ///
    /// Status, health and devices are fetched in sequence; the first
    /// failure aborts the snapshot.
    pub async fn metrics(&self, identifier: &str) -> Result<Metrics, CoreError> {
        let site = self.resolve_site(identifier).await?;
        let api = &self.inner.api;

        debug!(site = %site.name, "fetching status");
        let status = api.status().await?;

        debug!(site = %site.name, "fetching health info");
        let health = api.site_health(&site.name).await?;
        let [health] = <[_; 1]>::try_from(health).map_err(|h: Vec<_>| {
            CoreError::MalformedResponse {
                message: format!("expected one site health entry, got {}", h.len()),
            }
        })?;

        debug!(site = %site.name, "fetching device statistics");
        let devices = api.list_devices(&site.name).await?;

        Ok(build_metrics(status.server_version, &health, &devices))
    }
}
