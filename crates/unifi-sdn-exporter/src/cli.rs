//! Clap derive structures for the `unifi-sdn-exporter` binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Prometheus exporter for UniFi SDN controllers
#[derive(Debug, Parser)]
#[command(
    name = "unifi-sdn-exporter",
    version,
    disable_version_flag = true,
    about = "Export UniFi SDN controller metrics to Prometheus",
    long_about = "Serves /metrics?target=<controller>&site=<site> for every controller \
        listed in the configuration file, and an index of all sites at /."
)]
pub struct Cli {
    /// Address to listen on for HTTP requests
    #[arg(
        long = "web.listen-address",
        env = "UNIFI_SDN_LISTEN_ADDRESS",
        default_value = "0.0.0.0:9810",
        value_parser = parse_listen_address
    )]
    pub listen_address: SocketAddr,

    /// Path to the controller configuration file
    #[arg(
        long = "web.config",
        env = "UNIFI_SDN_CONFIG",
        default_value = "./config.toml"
    )]
    pub config: PathBuf,

    /// Log at debug level
    #[arg(long)]
    pub verbose: bool,

    /// Print version and exit
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

/// Accepts `host:port` and the port-only `:port` form.
fn parse_listen_address(raw: &str) -> Result<SocketAddr, String> {
    let full = if raw.starts_with(':') {
        format!("0.0.0.0{raw}")
    } else {
        raw.to_owned()
    };
    full.parse()
        .map_err(|e| format!("invalid listen address {raw:?}: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["unifi-sdn-exporter"]).unwrap();
        assert_eq!(cli.listen_address, "0.0.0.0:9810".parse().unwrap());
        assert_eq!(cli.config, PathBuf::from("./config.toml"));
        assert!(!cli.verbose);
    }

    #[test]
    fn dotted_flags() {
        let cli = Cli::try_parse_from([
            "unifi-sdn-exporter",
            "--web.listen-address",
            "127.0.0.1:9999",
            "--web.config",
            "/etc/unifi-sdn-exporter.toml",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.listen_address, "127.0.0.1:9999".parse().unwrap());
        assert_eq!(cli.config, PathBuf::from("/etc/unifi-sdn-exporter.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn short_v_prints_version() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["unifi-sdn-exporter", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        }
    }

    #[test]
    fn port_only_address() {
        assert_eq!(
            parse_listen_address(":9810").unwrap(),
            "0.0.0.0:9810".parse().unwrap()
        );
        assert!(parse_listen_address("nonsense").is_err());
    }
}
