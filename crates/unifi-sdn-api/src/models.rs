// Controller API response types
//
// Models for the controller's JSON API. Every response is wrapped in the
// `{ meta, data }` envelope. Fields use `#[serde(default)]` liberally
// because the API is inconsistent about field presence across firmware
// versions.

use serde::{Deserialize, Deserializer, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Raw envelope as received; `data` is decoded into the caller's type
/// only after `meta.rc` has been checked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEnvelope {
    pub meta: Meta,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Decoded envelope handed back to callers.
///
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub meta: Meta,
    pub data: T,
}

/// Metadata from the envelope. `rc` == `"ok"` means success.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
    /// Only present on `GET /status`.
    #[serde(default)]
    pub server_version: Option<String>,
    /// Only present on `GET /status`.
    #[serde(default)]
    pub up: Option<bool>,
}

// ── Site ─────────────────────────────────────────────────────────────

/// Site object from `/api/self/sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSite {
    /// BSON ObjectId.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Short letter code used in site-scoped paths (`/api/s/{name}/...`).
    pub name: String,
    /// Human-facing site name.
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub role: Option<String>,
}

// ── Site health ──────────────────────────────────────────────────────

/// Element of `stat/widget/health`. The endpoint is a singleton view:
/// exactly one element per site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSiteHealth {
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_wifi_utilization: WifiUtilization,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wifi_score: WifiScore,
}

/// Average wifi utilization per radio band, in percent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WifiUtilization {
    /// 5 GHz.
    #[serde(default, deserialize_with = "null_as_default")]
    pub na: f64,
    /// 2.4 GHz.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ng: f64,
}

/// Client satisfaction summary. The API exposes the total and the poor and
/// fair subsets only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WifiScore {
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_score_avg: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clients_with_poor_score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clients_with_fair_score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clients: u32,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device object from `stat/device`.
///
/// The API can return 100+ fields per device. We model the ones the
/// exporter derives metrics from; everything else lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDevice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac: String,
    /// Short model code, e.g. `"U7PG2"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    /// Firmware version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adopted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_in_lts: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_in_eol: bool,
    /// 0=disconnected, 1=connected, 2=pending, ...
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: i64,
    /// Unix seconds; 0 when never seen.
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_seen: i64,
    /// Seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uptime: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sys_stats: SysStats,
    #[serde(default)]
    pub uplink: Option<RawUplink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vap_table: Vec<RawVap>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// System statistics nested inside `RawDevice`.
///
/// Load averages arrive as strings, sometimes wrapped in an extra layer of
/// quotes; older firmware sends plain numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SysStats {
    #[serde(default, rename = "loadavg_1", deserialize_with = "string_or_number")]
    pub load_1: Option<String>,
    #[serde(default, rename = "loadavg_5", deserialize_with = "string_or_number")]
    pub load_5: Option<String>,
    #[serde(default, rename = "loadavg_15", deserialize_with = "string_or_number")]
    pub load_15: Option<String>,
}

/// Uplink description nested inside `RawDevice`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUplink {
    /// `"wire"` or `"wireless"`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub uplink_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_duplex: bool,
    /// MBit/s.
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed: i64,
}

/// Virtual access point entry from `vap_table`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVap {
    #[serde(default)]
    pub channel: Option<u32>,
    #[serde(default)]
    pub bssid: Option<String>,
    #[serde(default)]
    pub essid: Option<String>,
    #[serde(default, rename = "num_sta", deserialize_with = "null_as_default")]
    pub clients: u32,
    /// `"na"` (5 GHz) or `"ng"` (2.4 GHz).
    #[serde(default, deserialize_with = "null_as_default")]
    pub radio: String,
}

/// Treat an explicit `null` like an absent key. Firmware sends `null` for
/// empty tables and counters; one such record must not sink the inventory.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
        Repr::Text(s) => s,
        Repr::Number(n) => n.to_string(),
    }))
}
