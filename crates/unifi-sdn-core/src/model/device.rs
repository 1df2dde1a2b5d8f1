// ── Device facts ──

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumIter, FromRepr};

/// Known controller device states, indexed by their wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, FromRepr, Serialize)]
#[repr(u8)]
pub enum DeviceState {
    #[strum(serialize = "disconnected")]
    Disconnected = 0,
    #[strum(serialize = "connected")]
    Connected = 1,
    #[strum(serialize = "pending")]
    Pending = 2,
    #[strum(serialize = "firmware mismatch")]
    FirmwareMismatch = 3,
    #[strum(serialize = "upgrading")]
    Upgrading = 4,
    #[strum(serialize = "provisioning")]
    Provisioning = 5,
    #[strum(serialize = "heartbeat missed")]
    HeartbeatMissed = 6,
    #[strum(serialize = "adopting")]
    Adopting = 7,
    #[strum(serialize = "deleting")]
    Deleting = 8,
    #[strum(serialize = "inform error")]
    InformError = 9,
    #[strum(serialize = "adoption failed")]
    AdoptionFailed = 10,
    #[strum(serialize = "isolated")]
    Isolated = 11,
}

/// Raw status code as reported by the controller.
///
/// Codes outside the known table are kept and labelled `unknown (<code>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceStatus(i64);

impl DeviceStatus {
    pub fn from_code(code: i64) -> Self {
        Self(code)
    }

    pub fn code(self) -> i64 {
        self.0
    }

    pub fn state(self) -> Option<DeviceState> {
        u8::try_from(self.0).ok().and_then(DeviceState::from_repr)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state() {
            Some(state) => state.fmt(f),
            None => write!(f, "unknown ({})", self.0),
        }
    }
}

/// Facts derived from one adopted device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceMetrics {
    pub mac: String,
    pub firmware: String,
    /// Short model code, e.g. `"U7PG2"`.
    pub model: String,
    /// Product name for `model`, or `"unknown"`.
    pub model_name: String,
    pub lts: bool,
    pub eol: bool,

    pub status: DeviceStatus,
    pub uptime: Duration,
    /// `None` when the controller never saw the device.
    pub last_seen: Option<DateTime<Utc>>,

    /// `"1000FD"`, `"Mesh"`, or `"unknown (<type>)"`.
    pub uplink: String,
    /// MBit/s for wired uplinks, `-1` otherwise.
    pub uplink_speed: i64,
    /// One-minute load average; `-1` if unparseable, `0` if absent.
    pub load: f64,

    /// Connected clients per band (`"2.4"`, `"5"`, or the raw radio name).
    pub radios: BTreeMap<String, u32>,
}
