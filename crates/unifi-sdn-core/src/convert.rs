// ── API-to-domain conversions ──
//
// Bridges raw `unifi_sdn_api` response types into `unifi_sdn_core::model`
// values. Per-device oddities (quoted load strings, unknown uplink types,
// unlisted model codes) degrade to placeholder values instead of failing
// the snapshot.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use unifi_sdn_api::models::{RawUplink, RawVap};
use unifi_sdn_api::{RawDevice, RawSite, RawSiteHealth};

use crate::model::{DeviceMetrics, DeviceStatus, Metrics, Site, model_name};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a load average such as `"\"0.08\""`.
///
/// One layer of surrounding double quotes is stripped. Empty or absent
/// input yields `0.0`; anything unparseable yields `-1.0`.
pub fn parse_load(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return 0.0;
    };
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);
    unquoted.parse().unwrap_or(-1.0)
}

/// Map a VAP radio name to its band label.
pub fn band(radio: &str) -> &str {
    match radio {
        "na" => "5",
        "ng" => "2.4",
        other => other,
    }
}

/// Label and speed for an uplink. Only wired uplinks report a real speed.
pub fn uplink(uplink: Option<&RawUplink>) -> (String, i64) {
    let kind = uplink.map_or("", |u| u.uplink_type.as_str());
    match (kind, uplink) {
        ("wire", Some(u)) => {
            let duplex = if u.full_duplex { "FD" } else { "HD" };
            (format!("{}{duplex}", u.speed), u.speed)
        }
        ("wireless", _) => ("Mesh".to_owned(), -1),
        (other, _) => (format!("unknown ({other})"), -1),
    }
}

/// Sum connected clients per band across all virtual APs.
pub fn radios(vaps: &[RawVap]) -> BTreeMap<String, u32> {
    vaps.iter().fold(BTreeMap::new(), |mut acc, vap| {
        let sum = acc.entry(band(&vap.radio).to_owned()).or_default();
        *sum = sum.saturating_add(vap.clients);
        acc
    })
}

/// Unix seconds to a timestamp; `0` means never seen.
fn last_seen(epoch: i64) -> Option<DateTime<Utc>> {
    if epoch == 0 {
        return None;
    }
    DateTime::from_timestamp(epoch, 0)
}

fn uptime(secs: i64) -> Duration {
    Duration::from_secs(u64::try_from(secs).unwrap_or_default())
}

// ── Site ───────────────────────────────────────────────────────────

impl From<RawSite> for Site {
    fn from(raw: RawSite) -> Self {
        Self {
            name: raw.name,
            desc: raw.desc,
        }
    }
}

// ── Device ─────────────────────────────────────────────────────────

impl From<&RawDevice> for DeviceMetrics {
    fn from(raw: &RawDevice) -> Self {
        let (uplink, uplink_speed) = uplink(raw.uplink.as_ref());
        Self {
            mac: raw.mac.clone(),
            firmware: raw.version.clone(),
            model: raw.model.clone(),
            model_name: model_name(&raw.model).to_owned(),
            lts: raw.model_in_lts,
            eol: raw.model_in_eol,
            status: DeviceStatus::from_code(raw.state),
            uptime: uptime(raw.uptime),
            last_seen: last_seen(raw.last_seen),
            uplink,
            uplink_speed,
            load: parse_load(raw.sys_stats.load_1.as_deref()),
            radios: radios(&raw.vap_table),
        }
    }
}

/// Convert the device inventory, dropping devices that are not adopted.
///
/// Unadopted devices are listed under every site of a controller.
pub fn adopted_devices(raw: &[RawDevice]) -> Vec<DeviceMetrics> {
    raw.iter()
        .filter(|d| d.adopted)
        .map(DeviceMetrics::from)
        .collect()
}

// ── Snapshot ───────────────────────────────────────────────────────

/// Assemble a snapshot from the three independently fetched responses.
pub fn build_metrics(version: String, health: &RawSiteHealth, devices: &[RawDevice]) -> Metrics {
    let util = &health.average_wifi_utilization;
    let score = &health.wifi_score;
    let rated = score
        .clients_with_poor_score
        .saturating_add(score.clients_with_fair_score);

    Metrics {
        controller_version: version,
        wifi_utilization_24: util.ng,
        wifi_utilization_5: util.na,
        wifi_client_score: score.client_score_avg,
        clients_poor: score.clients_with_poor_score,
        clients_fair: score.clients_with_fair_score,
        clients_good: score.clients.saturating_sub(rated),
        devices: adopted_devices(devices),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn device(value: serde_json::Value) -> RawDevice {
        serde_json::from_value(value).unwrap()
    }

    fn vap(radio: &str, clients: u32) -> RawVap {
        RawVap {
            radio: radio.into(),
            clients,
            ..RawVap::default()
        }
    }

    // ── Load ─────────────────────────────────────────────────────────

    #[test]
    fn load_strips_one_layer_of_quotes() {
        assert!((parse_load(Some("\"1.23\"")) - 1.23).abs() < f64::EPSILON);
        assert!((parse_load(Some("1.23")) - 1.23).abs() < f64::EPSILON);
    }

    #[test]
    fn load_placeholders() {
        assert!((parse_load(Some("bogus")) + 1.0).abs() < f64::EPSILON);
        assert!((parse_load(Some("\"\"\"")) + 1.0).abs() < f64::EPSILON);
        assert!(parse_load(Some("")).abs() < f64::EPSILON);
        assert!(parse_load(None).abs() < f64::EPSILON);
    }

    #[test]
    fn lone_quote_is_unparseable() {
        assert!((parse_load(Some("\"")) + 1.0).abs() < f64::EPSILON);
    }

    // ── Uplink ───────────────────────────────────────────────────────

    #[test]
    fn wired_uplink_reports_speed_and_duplex() {
        let full = RawUplink {
            uplink_type: "wire".into(),
            full_duplex: true,
            speed: 1000,
        };
        assert_eq!(uplink(Some(&full)), ("1000FD".to_owned(), 1000));

        let half = RawUplink {
            full_duplex: false,
            speed: 100,
            ..full
        };
        assert_eq!(uplink(Some(&half)), ("100HD".to_owned(), 100));
    }

    #[test]
    fn wireless_uplink_is_mesh() {
        let mesh = RawUplink {
            uplink_type: "wireless".into(),
            full_duplex: false,
            speed: 300,
        };
        assert_eq!(uplink(Some(&mesh)), ("Mesh".to_owned(), -1));
    }

    #[test]
    fn other_uplinks_are_unknown() {
        let fiber = RawUplink {
            uplink_type: "fiber".into(),
            ..RawUplink::default()
        };
        assert_eq!(uplink(Some(&fiber)), ("unknown (fiber)".to_owned(), -1));
        assert_eq!(uplink(None), ("unknown ()".to_owned(), -1));
    }

    // ── Radios ───────────────────────────────────────────────────────

    #[test]
    fn radios_sum_per_band() {
        let counts = radios(&[vap("ng", 3), vap("ng", 4), vap("na", 5)]);
        assert_eq!(
            counts,
            BTreeMap::from([("2.4".to_owned(), 7), ("5".to_owned(), 5)])
        );
    }

    #[test]
    fn unknown_radio_is_kept_verbatim() {
        let counts = radios(&[vap("xx", 2)]);
        assert_eq!(counts, BTreeMap::from([("xx".to_owned(), 2)]));
    }

    #[test]
    fn radio_sums_saturate() {
        let r = radios(&[vap("na", u32::MAX), vap("na", 2)]);
        assert_eq!(r.get("5"), Some(&u32::MAX));
    }

    #[test]
    fn no_vaps_no_radios() {
        assert!(radios(&[]).is_empty());
    }

    // ── Device ───────────────────────────────────────────────────────

    #[test]
    fn unadopted_devices_are_dropped() {
        let raw = vec![
            device(json!({ "mac": "aa:aa:aa:aa:aa:aa", "adopted": true })),
            device(json!({ "mac": "bb:bb:bb:bb:bb:bb", "adopted": false })),
            device(json!({ "mac": "cc:cc:cc:cc:cc:cc" })),
        ];
        let macs: Vec<_> = adopted_devices(&raw).into_iter().map(|d| d.mac).collect();
        assert_eq!(macs, vec!["aa:aa:aa:aa:aa:aa"]);
    }

    #[test]
    fn device_facts_are_derived() {
        let raw = device(json!({
            "mac": "f0:9f:c2:00:00:01",
            "model": "U7PG2",
            "version": "4.3.20.11298",
            "adopted": true,
            "model_in_lts": true,
            "state": 1,
            "uptime": 3600,
            "last_seen": 1_700_000_000,
            "sys_stats": { "loadavg_1": "\"0.25\"" },
            "uplink": { "type": "wire", "full_duplex": true, "speed": 1000 },
            "vap_table": [{ "radio": "na", "num_sta": 2 }]
        }));
        let dev = DeviceMetrics::from(&raw);

        assert_eq!(dev.model_name, "UniFi AP-AC-Pro");
        assert!(dev.lts);
        assert!(!dev.eol);
        assert_eq!(dev.status.to_string(), "connected");
        assert_eq!(dev.uptime, Duration::from_secs(3600));
        assert_eq!(dev.last_seen.map(|t| t.timestamp()), Some(1_700_000_000));
        assert_eq!(dev.uplink, "1000FD");
        assert!((dev.load - 0.25).abs() < f64::EPSILON);
        assert_eq!(dev.radios.get("5"), Some(&2));
    }

    #[test]
    fn never_seen_device_has_no_timestamp() {
        let dev = DeviceMetrics::from(&device(json!({ "mac": "x", "adopted": true })));
        assert_eq!(dev.last_seen, None);
        assert_eq!(dev.uptime, Duration::ZERO);
        assert_eq!(dev.model_name, "unknown");
    }

    #[test]
    fn negative_uptime_clamps_to_zero() {
        let dev = DeviceMetrics::from(&device(json!({ "mac": "x", "uptime": -5 })));
        assert_eq!(dev.uptime, Duration::ZERO);
    }

    // ── Snapshot ─────────────────────────────────────────────────────

    fn health(total: u32, poor: u32, fair: u32) -> RawSiteHealth {
        serde_json::from_value(json!({
            "average_wifi_utilization": { "na": 12.5, "ng": 40.0 },
            "wifi_score": {
                "client_score_avg": 91.0,
                "clients_with_poor_score": poor,
                "clients_with_fair_score": fair,
                "clients": total
            }
        }))
        .unwrap()
    }

    #[test]
    fn good_clients_are_the_remainder() {
        let m = build_metrics("6.0.43".into(), &health(100, 10, 20), &[]);
        assert_eq!((m.clients_poor, m.clients_fair, m.clients_good), (10, 20, 70));
    }

    #[test]
    fn good_clients_saturate_at_zero() {
        let m = build_metrics(String::new(), &health(5, 10, 20), &[]);
        assert_eq!(m.clients_good, 0);
    }

    #[test]
    fn bands_are_mapped() {
        let m = build_metrics("6.0.43".into(), &health(0, 0, 0), &[]);
        assert!((m.wifi_utilization_24 - 40.0).abs() < f64::EPSILON);
        assert!((m.wifi_utilization_5 - 12.5).abs() < f64::EPSILON);
        assert!((m.wifi_client_score - 91.0).abs() < f64::EPSILON);
        assert_eq!(m.controller_version, "6.0.43");
    }

    #[test]
    fn snapshot_shape() {
        let devices = vec![device(json!({
            "mac": "f0:9f:c2:00:00:02",
            "model": "US8P60",
            "version": "5.43.23",
            "adopted": true,
            "state": 5,
            "uptime": 120,
            "uplink": { "type": "wireless" },
            "vap_table": [{ "radio": "ng", "num_sta": 1 }, { "radio": "ng", "num_sta": 2 }]
        }))];
        let m = build_metrics("6.0.43".into(), &health(3, 1, 0), &devices);

        insta::assert_json_snapshot!(m, @r#"
        {
          "controller_version": "6.0.43",
          "wifi_utilization_24": 40.0,
          "wifi_utilization_5": 12.5,
          "wifi_client_score": 91.0,
          "clients_poor": 1,
          "clients_fair": 0,
          "clients_good": 2,
          "devices": [
            {
              "mac": "f0:9f:c2:00:00:02",
              "firmware": "5.43.23",
              "model": "US8P60",
              "model_name": "UniFi Switch 8 POE-60W",
              "lts": false,
              "eol": false,
              "status": 5,
              "uptime": {
                "secs": 120,
                "nanos": 0
              },
              "last_seen": null,
              "uplink": "Mesh",
              "uplink_speed": -1,
              "load": 0.0,
              "radios": {
                "2.4": 3
              }
            }
          ]
        }
        "#);
    }
}
