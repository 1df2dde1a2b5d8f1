// ── Runtime controller configuration ──
//
// Describes *how* to reach one controller. Carries credential data and
// connection tuning, but never touches disk: the config crate builds a
// `ControllerConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use unifi_sdn_api::TlsMode;
use unifi_sdn_api::transport::DEFAULT_TIMEOUT;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Only for controllers configured `insecure`.
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for connecting to a single controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Optional short name used as the scrape target.
    pub alias: String,
    /// Controller URL (e.g. `https://unifi.example.com:8443`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn new(url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            alias: String::new(),
            url,
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The name scrapes use to select this controller: the alias, or the
    /// URL's host when no alias is set.
    pub fn target_name(&self) -> &str {
        if self.alias.is_empty() {
            self.url.host_str().unwrap_or_default()
        } else {
            &self.alias
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(url: &str) -> ControllerConfig {
        ControllerConfig::new(
            Url::parse(url).unwrap(),
            "exporter",
            SecretString::from("secret".to_string()),
        )
    }

    #[test]
    fn target_name_prefers_alias() {
        let mut cfg = config("https://unifi.example.com:8443");
        cfg.alias = "main".into();
        assert_eq!(cfg.target_name(), "main");
    }

    #[test]
    fn target_name_falls_back_to_host() {
        let cfg = config("https://unifi.example.com:8443/manage");
        assert_eq!(cfg.target_name(), "unifi.example.com");
    }

    #[test]
    fn defaults_are_strict_tls_and_ten_seconds() {
        let cfg = config("https://unifi.example.com");
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }
}
