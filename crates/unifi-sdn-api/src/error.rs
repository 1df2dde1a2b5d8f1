use thiserror::Error;

/// Top-level error type for the `unifi-sdn-api` crate.
///
/// Separates "the controller refused" ([`RequestRejected`](Self::RequestRejected))
/// from "the controller said yes but sent nothing usable"
/// ([`MalformedResponse`](Self::MalformedResponse)) and from HTTP-level
/// failures. `unifi-sdn-core` wraps these for its callers.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// The controller URL is not an absolute http(s) URL with a host.
    #[error("Invalid controller endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Username or password is empty.
    #[error("Missing credentials: username and password are required")]
    MissingCredentials,

    // ── HTTP status ─────────────────────────────────────────────────
    /// HTTP 401. The session expired (or never existed); the request is
    /// retried once after a fresh login, and this variant never escapes
    /// [`ApiClient::get`](crate::ApiClient::get).
    #[error("{method} {url}: unauthorized")]
    Unauthorized {
        method: String,
        url: String,
        body: String,
    },

    /// Any non-200 response that is not retried.
    #[error("{method} {url}: unexpected HTTP status {status}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    // ── Envelope ────────────────────────────────────────────────────
    /// The `{ meta: { rc } }` envelope reports failure.
    #[error("Request rejected by controller: {message}")]
    RequestRejected { message: String },

    /// Envelope declared success but the payload was missing or undecodable.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// TLS setup error (unreadable or invalid CA certificate).
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the controller refused our session or credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Turn a retryable 401 into a terminal [`UnexpectedStatus`](Self::UnexpectedStatus).
    ///
    /// Used once the single re-login budget has been spent.
    pub(crate) fn into_terminal(self) -> Self {
        match self {
            Self::Unauthorized { method, url, body } => Self::UnexpectedStatus {
                method,
                url,
                status: 401,
                body,
            },
            other => other,
        }
    }
}
