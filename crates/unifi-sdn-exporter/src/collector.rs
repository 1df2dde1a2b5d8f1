//! Prometheus exposition of one site snapshot.
//!
//! Every scrape fills a fresh `Registry` so label sets from earlier scrapes
//! never linger. Families without samples are dropped by `gather`, which
//! keeps a failed scrape down to the `up` series.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use unifi_sdn_core::{DeviceMetrics, Metrics};

const NAMESPACE: &str = "unifi_sdn";

struct SiteGauges {
    up: GaugeVec,
    wifi_utilization: GaugeVec,
    wifi_client_score: GaugeVec,
    wifi_clients_count: GaugeVec,
    device_status: GaugeVec,
    device_uptime: GaugeVec,
    device_last_seen: GaugeVec,
    device_load: GaugeVec,
    device_clients: GaugeVec,
    device_uplink: GaugeVec,
}

fn opts(subsystem: &str, name: &str, help: &str) -> Opts {
    Opts::new(name, help)
        .namespace(NAMESPACE)
        .subsystem(subsystem)
}

fn gauge_vec(
    registry: &Registry,
    subsystem: &str,
    name: &str,
    help: &str,
    labels: &[&str],
) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(opts(subsystem, name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl SiteGauges {
    fn register(registry: &Registry) -> prometheus::Result<Self> {
        Ok(Self {
            up: gauge_vec(registry, "controller", "up", "indicator whether controller is reachable", &["version"])?,
            wifi_utilization: gauge_vec(registry, "site", "wifi_utilization", "average Wifi utilization", &["band"])?,
            wifi_client_score: gauge_vec(registry, "site", "wifi_client_score", "average client score", &[])?,
            wifi_clients_count: gauge_vec(registry, "site", "wifi_clients_count", "number of clients by rating", &["rating"])?,
            device_status: gauge_vec(
                registry,
                "device",
                "status",
                "current device status",
                &["mac", "desc", "model_id", "model", "firmware"],
            )?,
            device_uptime: gauge_vec(registry, "device", "uptime", "uptime of device in seconds", &["mac"])?,
            device_last_seen: gauge_vec(
                registry,
                "device",
                "last_seen",
                "time the controller last heard from the device, in Unix seconds",
                &["mac"],
            )?,
            device_load: gauge_vec(registry, "device", "load", "current system load of endpoint", &["mac"])?,
            device_clients: gauge_vec(registry, "device", "clients", "number of connected WLAN clients", &["mac", "band"])?,
            device_uplink: gauge_vec(registry, "device", "uplink", "uplink type and speed", &["mac", "type"])?,
        })
    }

    fn observe(&self, m: &Metrics) {
        self.up.with_label_values(&[m.controller_version.as_str()]).set(1.0);

        self.wifi_utilization.with_label_values(&["2.4"]).set(m.wifi_utilization_24);
        self.wifi_utilization.with_label_values(&["5"]).set(m.wifi_utilization_5);
        self.wifi_client_score.with_label_values(&[]).set(m.wifi_client_score);
        self.wifi_clients_count.with_label_values(&["poor"]).set(f64::from(m.clients_poor));
        self.wifi_clients_count.with_label_values(&["fair"]).set(f64::from(m.clients_fair));
        self.wifi_clients_count.with_label_values(&["good"]).set(f64::from(m.clients_good));

        for dev in &m.devices {
            self.observe_device(dev);
        }
    }

    fn observe_device(&self, dev: &DeviceMetrics) {
        let mac = dev.mac.as_str();
        let status = dev.status.to_string();
        self.device_status
            .with_label_values(&[mac, &status, &dev.model, &dev.model_name, &dev.firmware])
            .set(as_gauge(dev.status.code()));

        if let Some(seen) = dev.last_seen {
            self.device_last_seen
                .with_label_values(&[mac])
                .set(as_gauge(seen.timestamp()));
        }

        // Offline devices report stale figures for everything else.
        if dev.uptime.is_zero() {
            self.device_uptime.with_label_values(&[mac]).set(0.0);
            return;
        }

        self.device_uptime
            .with_label_values(&[mac])
            .set(dev.uptime.as_secs_f64());
        self.device_load.with_label_values(&[mac]).set(dev.load);
        self.device_uplink
            .with_label_values(&[mac, &dev.uplink])
            .set(as_gauge(dev.uplink_speed));
        for (band, clients) in &dev.radios {
            self.device_clients
                .with_label_values(&[mac, band])
                .set(f64::from(*clients));
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn as_gauge(value: i64) -> f64 {
    value as f64
}

/// Render a scrape result in the Prometheus text format.
///
/// A failed collection (`None`) renders only `unifi_sdn_controller_up{version=""} 0`.
pub fn render(snapshot: Option<&Metrics>) -> prometheus::Result<String> {
    let registry = Registry::new();
    let gauges = SiteGauges::register(&registry)?;

    match snapshot {
        Some(m) => gauges.observe(m),
        None => gauges.up.with_label_values(&[""]).set(0.0),
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// `Content-Type` of [`render`]'s output.
pub fn content_type() -> String {
    TextEncoder::new().format_type().to_owned()
}
