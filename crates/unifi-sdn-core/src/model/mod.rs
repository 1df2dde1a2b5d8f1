// ── Domain model ──
//
// Values produced by the metrics pipeline. Everything here is built fresh
// per snapshot and never mutated afterwards.

pub mod catalog;
pub mod device;
pub mod metrics;
pub mod site;

pub use catalog::model_name;
pub use device::{DeviceMetrics, DeviceState, DeviceStatus};
pub use metrics::Metrics;
pub use site::Site;
