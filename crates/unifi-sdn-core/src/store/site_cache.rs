// ── Time-bounded site directory ──
//
// Readers load the current directory through `ArcSwapOption` and never
// block. A stale or empty directory is refreshed on the calling path; the
// refresh mutex serializes fetches, and freshness is checked again once it
// is held so that a burst of scrapes triggers a single fetch.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::model::Site;

/// How long a fetched site list is trusted.
pub const SITE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct SiteDirectory {
    sites: Arc<[Site]>,
    expires_at: Instant,
}

/// Cached copy of one controller's site list.
pub struct SiteCache {
    current: ArcSwapOption<SiteDirectory>,
    refresh: Mutex<()>,
    ttl: Duration,
}

impl SiteCache {
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            refresh: Mutex::new(()),
            ttl: SITE_CACHE_TTL,
        }
    }

    #[cfg(test)]
    fn is_fresh(&self) -> bool {
        self.fresh().is_some()
    }

    fn fresh(&self) -> Option<Arc<[Site]>> {
        self.current
            .load_full()
            .filter(|dir| Instant::now() < dir.expires_at)
            .map(|dir| Arc::clone(&dir.sites))
    }

    /// Return the cached sites, calling `fetch` first if the cache is stale.
    ///
    /// The new list and its expiry are published in one swap. If `fetch`
    /// fails the previous directory stays in place and the error is
    /// returned.
    pub async fn load<F, Fut, E>(&self, fetch: F) -> Result<Arc<[Site]>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Site>, E>>,
    {
        if let Some(sites) = self.fresh() {
            return Ok(sites);
        }

        let _guard = self.refresh.lock().await;
        if let Some(sites) = self.fresh() {
            return Ok(sites);
        }

        debug!("refreshing site directory");
        let sites: Arc<[Site]> = fetch().await?.into();
        self.current.store(Some(Arc::new(SiteDirectory {
            sites: Arc::clone(&sites),
            expires_at: Instant::now() + self.ttl,
        })));
        debug!(count = sites.len(), "site directory refreshed");

        Ok(sites)
    }
}

impl Default for SiteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn site(name: &str, desc: &str) -> Site {
        Site {
            name: name.into(),
            desc: desc.into(),
        }
    }

    async fn load_counted(
        cache: &SiteCache,
        calls: &AtomicUsize,
    ) -> Result<Arc<[Site]>, &'static str> {
        cache
            .load(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![site("default", "Default")])
            })
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_cache_is_not_refetched() {
        let cache = SiteCache::new();
        let calls = AtomicUsize::new(0);

        assert!(!cache.is_fresh());
        load_counted(&cache, &calls).await.ok();
        tokio::time::advance(SITE_CACHE_TTL - Duration::from_secs(1)).await;
        load_counted(&cache, &calls).await.ok();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_fresh());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_cache_is_refetched() {
        let cache = SiteCache::new();
        let calls = AtomicUsize::new(0);

        load_counted(&cache, &calls).await.ok();
        tokio::time::advance(SITE_CACHE_TTL).await;
        assert!(!cache.is_fresh());
        load_counted(&cache, &calls).await.ok();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_previous_directory() {
        let cache = SiteCache::new();
        let calls = AtomicUsize::new(0);
        load_counted(&cache, &calls).await.ok();
        tokio::time::advance(SITE_CACHE_TTL).await;

        let result = cache
            .load(|| async { Err::<Vec<Site>, _>("controller down") })
            .await;
        assert_eq!(result.err(), Some("controller down"));

        // Still stale, so the next caller refreshes again.
        let sites = load_counted(&cache, &calls).await.ok();
        assert_eq!(sites.as_deref(), Some(&[site("default", "Default")][..]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_cache_error_is_returned() {
        let cache = SiteCache::new();
        let result = cache
            .load(|| async { Err::<Vec<Site>, _>("unreachable") })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_fresh());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_loads_share_one_fetch() {
        let cache = SiteCache::new();
        let calls = AtomicUsize::new(0);

        let slow_fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<_, &'static str>(vec![site("default", "Default")])
        };

        let (a, b) = tokio::join!(cache.load(slow_fetch), cache.load(slow_fetch));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
