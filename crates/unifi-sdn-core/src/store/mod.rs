// ── Site directory store ──
//
// Lock-free reads of the cached site list with serialized refresh.

mod site_cache;

pub use site_cache::{SITE_CACHE_TTL, SiteCache};
