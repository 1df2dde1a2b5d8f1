//! Configuration for unifi-sdn-exporter.
//!
//! A TOML file lists the controllers to scrape; each entry is validated,
//! its password resolved (env var or plaintext), and translated to
//! `unifi_sdn_core::ControllerConfig`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Format, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use unifi_sdn_core::{ControllerConfig, TlsVerification};

/// Request timeout in seconds when an entry does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for controller '{controller}'")]
    NoCredentials { controller: String },

    #[error("duplicate controller target '{target}'")]
    DuplicateTarget { target: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Controllers to scrape, one `[[unifi-controller]]` table each.
    #[serde(rename = "unifi-controller", default)]
    pub controllers: Vec<ControllerEntry>,
}

/// One `[[unifi-controller]]` table.
///
/// Capitalized keys (`Alias`, `URL`, ...) are accepted for older files.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ControllerEntry {
    /// Target name; defaults to the URL's host.
    #[serde(default, alias = "Alias")]
    pub alias: String,

    /// Controller base URL (e.g. "https://unifi.example.com:8443").
    #[serde(alias = "URL", alias = "Url")]
    pub url: String,

    #[serde(default, alias = "Username")]
    pub username: String,

    /// Password (plaintext, prefer `password_env`).
    #[serde(default, alias = "Password")]
    pub password: Option<String>,

    /// Environment variable holding the password.
    #[serde(default)]
    pub password_env: Option<String>,

    /// Skip TLS certificate verification for this controller.
    #[serde(default, alias = "Insecure")]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl ControllerEntry {
    /// Human label for error messages.
    fn label(&self, index: usize) -> String {
        [&self.alias, &self.url]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("#{index}"))
    }
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let config: Config = Figment::new().merge(Toml::file(path)).extract()?;
    Ok(config)
}

/// Load `path` and translate every entry into a `ControllerConfig`.
pub fn load_controllers(path: &Path) -> Result<Vec<ControllerConfig>, ConfigError> {
    controller_configs(&load_config(path)?)
}

/// Translate every entry, rejecting duplicate target names.
pub fn controller_configs(config: &Config) -> Result<Vec<ControllerConfig>, ConfigError> {
    let env = |name: &str| std::env::var(name).ok();

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(config.controllers.len());
    for (index, entry) in config.controllers.iter().enumerate() {
        let cfg = entry_to_controller_config(entry, index, env)?;
        if !seen.insert(cfg.target_name().to_owned()) {
            return Err(ConfigError::DuplicateTarget {
                target: cfg.target_name().to_owned(),
            });
        }
        out.push(cfg);
    }
    Ok(out)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the password: `password_env` (when the variable is set), then
/// the plaintext `password`.
pub fn resolve_password<F>(
    entry: &ControllerEntry,
    controller: &str,
    env: F,
) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = entry
        .password_env
        .as_deref()
        .and_then(env)
        .filter(|pw| !pw.is_empty());
    if let Some(pw) = from_env {
        return Ok(SecretString::from(pw));
    }

    match entry.password.as_deref() {
        Some(pw) if !pw.is_empty() => Ok(SecretString::from(pw.to_owned())),
        _ => Err(ConfigError::NoCredentials {
            controller: controller.into(),
        }),
    }
}

/// Build a `ControllerConfig` from one entry.
pub fn entry_to_controller_config<F>(
    entry: &ControllerEntry,
    index: usize,
    env: F,
) -> Result<ControllerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let label = entry.label(index);
    let field = |name: &str| format!("unifi-controller[{index}].{name}");

    let url = Url::parse(&entry.url).map_err(|e| ConfigError::Validation {
        field: field("url"),
        reason: format!("{e}: {:?}", entry.url),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Validation {
            field: field("url"),
            reason: format!("expected an http(s) URL with a host, got {:?}", entry.url),
        });
    }

    if entry.username.is_empty() {
        return Err(ConfigError::NoCredentials { controller: label });
    }
    let password = resolve_password(entry, &label, env)?;

    let tls = if entry.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = entry.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = match entry.timeout {
        Some(0) => {
            return Err(ConfigError::Validation {
                field: field("timeout"),
                reason: "must be at least one second".into(),
            });
        }
        Some(secs) => Duration::from_secs(secs),
        None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    };

    let mut cfg = ControllerConfig::new(url, entry.username.clone(), password);
    cfg.alias.clone_from(&entry.alias);
    cfg.tls = tls;
    cfg.timeout = timeout;
    Ok(cfg)
}
