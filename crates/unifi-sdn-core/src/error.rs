// ── Core error types ──
//
// Errors surfaced by unifi-sdn-core. Transport failures are wrapped, not
// translated: the exporter logs them verbatim and only needs to tell
// "site does not exist" apart from "controller unusable".

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No site matches the identifier by short code or display name.
    #[error("Site not found: {site}")]
    SiteNotFound { site: String },

    /// The controller answered, but the response breaks a structural
    /// expectation (e.g. the health widget is not a singleton).
    #[error("Malformed controller response: {message}")]
    MalformedResponse { message: String },

    #[error(transparent)]
    Api(#[from] unifi_sdn_api::Error),
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SiteNotFound { .. })
    }

    /// Returns `true` if the controller rejected the configured credentials.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Api(e) => e.is_unauthorized() || matches!(e, unifi_sdn_api::Error::MissingCredentials),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let err = CoreError::SiteNotFound {
            site: "lab".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_auth_failure());
        assert_eq!(err.to_string(), "Site not found: lab");
    }

    #[test]
    fn terminal_401_is_auth_failure() {
        let err = CoreError::from(unifi_sdn_api::Error::UnexpectedStatus {
            method: "GET".into(),
            url: "https://ctrl/api/self/sites".into(),
            status: 401,
            body: String::new(),
        });
        assert!(err.is_auth_failure());
        assert!(!err.is_not_found());
    }

    #[test]
    fn server_error_is_not_auth_failure() {
        let err = CoreError::from(unifi_sdn_api::Error::UnexpectedStatus {
            method: "GET".into(),
            url: "https://ctrl/status".into(),
            status: 503,
            body: String::new(),
        });
        assert!(!err.is_auth_failure());
    }
}
