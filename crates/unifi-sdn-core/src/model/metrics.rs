use serde::Serialize;

use super::device::DeviceMetrics;

/// Point-in-time snapshot of one site.
///
/// Either fully populated or not produced at all: the pipeline returns an
/// error instead of a partial snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub controller_version: String,

    /// Average utilization of the 2.4 GHz band, in percent.
    pub wifi_utilization_24: f64,
    /// Average utilization of the 5 GHz band, in percent.
    pub wifi_utilization_5: f64,
    pub wifi_client_score: f64,

    pub clients_poor: u32,
    pub clients_fair: u32,
    pub clients_good: u32,

    /// Adopted devices only.
    pub devices: Vec<DeviceMetrics>,
}
