// unifi-sdn-core: Site directory, metrics pipeline and device derivation
// between unifi-sdn-api and the exporter.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use store::SiteCache;

pub use model::{DeviceMetrics, DeviceState, DeviceStatus, Metrics, Site};
