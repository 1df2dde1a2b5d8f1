//! Startup error types with miette diagnostics.

use std::net::SocketAddr;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use unifi_sdn_config::ConfigError;
use unifi_sdn_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const BIND: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum ExporterError {
    #[error("Configuration file not found: {}", path.display())]
    #[diagnostic(
        code(unifi_sdn::no_config),
        help("Pass the file with --web.config, or create ./config.toml with one [[unifi-controller]] table per controller.")
    )]
    NoConfig { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(code(unifi_sdn::config))]
    Config(ConfigError),

    #[error("Configuration lists no controllers")]
    #[diagnostic(
        code(unifi_sdn::no_controllers),
        help("Add at least one [[unifi-controller]] table with url, username and password.")
    )]
    NoControllers,

    #[error("Invalid controller '{target}'")]
    #[diagnostic(code(unifi_sdn::controller))]
    Controller {
        target: String,
        #[source]
        source: CoreError,
    },

    #[error("Could not listen on {addr}")]
    #[diagnostic(
        code(unifi_sdn::bind),
        help("Check that the port is free, or choose another with --web.listen-address.")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server failed")]
    #[diagnostic(code(unifi_sdn::serve))]
    Serve(#[source] std::io::Error),
}

impl From<ConfigError> for ExporterError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => Self::NoConfig { path },
            other => Self::Config(other),
        }
    }
}

impl ExporterError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. }
            | Self::Config(_)
            | Self::NoControllers
            | Self::Controller { .. } => exit_code::CONFIG,
            Self::Bind { .. } => exit_code::BIND,
            Self::Serve(_) => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_gets_its_own_diagnostic() {
        let err = ExporterError::from(ConfigError::NotFound {
            path: PathBuf::from("./config.toml"),
        });
        assert!(matches!(err, ExporterError::NoConfig { .. }));
        assert_eq!(err.exit_code(), exit_code::CONFIG);
        assert_eq!(
            err.to_string(),
            "Configuration file not found: ./config.toml"
        );
    }

    #[test]
    fn validation_errors_are_wrapped() {
        let err = ExporterError::from(ConfigError::DuplicateTarget {
            target: "main".into(),
        });
        assert!(matches!(err, ExporterError::Config(_)));
        assert_eq!(err.to_string(), "duplicate controller target 'main'");
    }
}
