// Session authentication
//
// The controller authenticates with a cookie set by `POST /api/login` and
// expires it on its own schedule. We never predict expiry: a 401 tells us
// the session is gone, the session cookie is force-expired, and a fresh
// login repopulates the jar shared by every request to that controller.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::IgnoredAny;
use tracing::debug;
use url::Url;

use crate::client::ApiClient;
use crate::error::Error;

/// Name of the controller's session cookie.
pub const SESSION_COOKIE: &str = "unifises";

/// Login endpoint on classic (standalone) controllers.
pub const LOGIN_PATH: &str = "/api/login";

/// Username/password pair for the session login.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Both fields must be non-empty.
    pub fn new(username: impl Into<String>, password: SecretString) -> Result<Self, Error> {
        let username = username.into();
        if username.is_empty() || password.expose_secret().is_empty() {
            return Err(Error::MissingCredentials);
        }
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Request body for `POST /api/login`.
#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    remember: bool,
    strict: bool,
}

/// Opaque handle on the session held in a controller's cookie jar.
///
/// There is no client-visible expiry: the session is valid until a request
/// comes back 401.
#[derive(Debug, Clone)]
pub struct Session {
    jar: Arc<Jar>,
    origin: Url,
}

impl Session {
    pub(crate) fn new(jar: Arc<Jar>, origin: Url) -> Self {
        Self { jar, origin }
    }

    /// Force-expire the session cookie so a stale value cannot ride along
    /// with the next login.
    pub fn invalidate(&self) {
        let expired = format!("{SESSION_COOKIE}=; Max-Age=0; Path=/");
        self.jar.add_cookie_str(&expired, &self.origin);
    }

    /// `Cookie` header value currently sent to the controller, if any.
    pub fn cookie_header(&self) -> Option<String> {
        let cookies = self.jar.cookies(&self.origin)?;
        cookies.to_str().ok().map(String::from)
    }

    /// Returns `true` if the jar holds a session cookie for the controller.
    pub fn is_established(&self) -> bool {
        self.cookie_header().is_some_and(|header| {
            header
                .split(';')
                .any(|pair| pair.trim_start().starts_with(&format!("{SESSION_COOKIE}=")))
        })
    }
}

impl ApiClient {
    /// Authenticate with the controller using the configured credentials.
    ///
    /// `POST /api/login` with `{username, password, remember: true, strict: false}`.
    /// On success the session cookie lands in the shared jar and is used by
    /// all subsequent requests. A rejected login (including HTTP 401) is
    /// returned as a terminal error.
    pub async fn login(&self) -> Result<(), Error> {
        self.session().invalidate();

        let credentials = self.credentials();
        let body = LoginRequest {
            username: credentials.username(),
            password: credentials.password.expose_secret(),
            remember: true,
            strict: false,
        };

        debug!(username = credentials.username(), "logging in");
        self.request::<IgnoredAny, _>(reqwest::Method::POST, LOGIN_PATH, Some(&body))
            .await
            .map_err(Error::into_terminal)?;

        debug!("login successful");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session() -> Session {
        let origin = Url::parse("https://controller.example:8443/").unwrap();
        Session::new(Arc::new(Jar::default()), origin)
    }

    #[test]
    fn credentials_reject_empty_username() {
        let result = Credentials::new("", SecretString::from("secret".to_string()));
        assert!(matches!(result, Err(Error::MissingCredentials)));
    }

    #[test]
    fn credentials_reject_empty_password() {
        let result = Credentials::new("admin", SecretString::from(String::new()));
        assert!(matches!(result, Err(Error::MissingCredentials)));
    }

    #[test]
    fn fresh_session_is_not_established() {
        assert!(!session().is_established());
    }

    #[test]
    fn invalidate_expires_session_cookie() {
        let session = session();
        session
            .jar
            .add_cookie_str("unifises=abc123; Path=/", &session.origin);
        assert!(session.is_established());

        session.invalidate();
        assert!(!session.is_established());
    }

    #[test]
    fn invalidate_keeps_unrelated_cookies() {
        let session = session();
        session
            .jar
            .add_cookie_str("unifises=abc123; Path=/", &session.origin);
        session
            .jar
            .add_cookie_str("csrf_token=xyz; Path=/", &session.origin);

        session.invalidate();
        assert_eq!(session.cookie_header().as_deref(), Some("csrf_token=xyz"));
    }
}
