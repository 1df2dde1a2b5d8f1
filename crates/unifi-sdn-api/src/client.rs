// Controller API HTTP client
//
// Wraps `reqwest::Client` with URL construction, envelope unwrapping, and
// the retry-on-expiry protocol. Endpoint helpers (sites, status, health,
// devices) live in separate files as inherent methods to keep this module
// focused on transport mechanics.

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, Session};
use crate::error::Error;
use crate::models::{ApiResponse, RawEnvelope};
use crate::transport::TransportConfig;

/// Authenticated HTTP client for one UniFi controller.
///
/// Owns the controller's `reqwest::Client` and cookie jar. Safe to share
/// across tasks: every clone of the inner client sees the same session, so
/// a login performed by one request is immediately visible to the others.
pub struct ApiClient {
    http: reqwest::Client,
    origin: Url,
    credentials: Credentials,
    session: Session,
}

impl ApiClient {
    /// Create a new client for the controller at `endpoint`.
    ///
    /// Only the scheme, host and port of `endpoint` are used; request paths
    /// are always absolute. A cookie jar is created if the transport config
    /// does not already carry one.
    pub fn new(
        endpoint: &Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let origin = origin_of(endpoint)?;

        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        let jar = config.cookie_jar.unwrap_or_default();

        Ok(Self {
            http,
            session: Session::new(jar, origin.clone()),
            origin,
            credentials,
        })
    }

    /// The session shared by all requests to this controller.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.origin
            .join(path)
            .map_err(|e| Error::InvalidEndpoint {
                url: format!("{}{path}", self.origin),
                reason: e.to_string(),
            })
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Perform one JSON exchange with the controller.
    ///
    /// Sends `Accept: application/json` and, when `body` is present, a JSON
    /// body. A 401 yields [`Error::Unauthorized`]; any other non-200 yields
    /// [`Error::UnexpectedStatus`]. No authentication is attempted here.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized {
                method: method.to_string(),
                url: url.to_string(),
                body: text,
            });
        }

        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        decode_envelope(&text)
    }

    /// GET `path`, logging in and retrying once if the session has expired.
    ///
    /// Only a 401 triggers the login; a second 401 after a successful login
    /// is returned as [`Error::UnexpectedStatus`]. Every other error is
    /// returned unmodified.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, Error> {
        match self.request::<T, ()>(Method::GET, path, None).await {
            Err(Error::Unauthorized { .. }) => {
                debug!(path, "unauthorized, logging in");
                self.login().await?;
                self.request::<T, ()>(Method::GET, path, None)
                    .await
                    .map_err(Error::into_terminal)
            }
            Err(e) => {
                debug!(path, error = %e, "request failed");
                Err(e)
            }
            ok => ok,
        }
    }
}

/// Reduce `endpoint` to `scheme://host[:port]/`, rejecting anything that
/// cannot address a controller.
fn origin_of(endpoint: &Url) -> Result<Url, Error> {
    let invalid = |reason: &str| Error::InvalidEndpoint {
        url: endpoint.to_string(),
        reason: reason.into(),
    };

    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if endpoint.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }

    let mut origin = endpoint.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    Ok(origin)
}

/// Parse the `{ meta, data }` envelope.
///
/// `meta.rc != "ok"` is a [`Error::RequestRejected`]; an `ok` envelope with
/// no `data`, or `data` that does not decode into `T`, is a
/// [`Error::MalformedResponse`].
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, Error> {
    let envelope: RawEnvelope = serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
        message: format!("decoding envelope failed: {e}"),
        body: body.to_owned(),
    })?;

    if envelope.meta.rc != "ok" {
        return Err(Error::RequestRejected {
            message: envelope
                .meta
                .msg
                .unwrap_or_else(|| format!("rc={}", envelope.meta.rc)),
        });
    }

    let Some(data) = envelope.data else {
        return Err(Error::MalformedResponse {
            message: "missing response payload".into(),
            body: body.to_owned(),
        });
    };

    let data = serde_json::from_value(data).map_err(|e| {
        debug!(body, error = %e, "decoding response payload failed");
        Error::MalformedResponse {
            message: format!("decoding response failed: {e}"),
            body: body.to_owned(),
        }
    })?;

    Ok(ApiResponse {
        meta: envelope.meta,
        data,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn origin_strips_path_and_query() {
        let url = Url::parse("https://ctrl.example:8443/manage/site?x=1#top").unwrap();
        assert_eq!(origin_of(&url).unwrap().as_str(), "https://ctrl.example:8443/");
    }

    #[test]
    fn origin_rejects_non_http_scheme() {
        let url = Url::parse("ftp://ctrl.example/").unwrap();
        assert!(matches!(
            origin_of(&url),
            Err(Error::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn envelope_rc_error_is_rejected() {
        let body = r#"{"meta":{"rc":"error","msg":"api.err.LoginRequired"},"data":[]}"#;
        match decode_envelope::<Vec<serde_json::Value>>(body) {
            Err(Error::RequestRejected { message }) => {
                assert_eq!(message, "api.err.LoginRequired");
            }
            other => panic!("expected RequestRejected, got: {other:?}"),
        }
    }

    #[test]
    fn envelope_rc_error_without_message_reports_rc() {
        let body = r#"{"meta":{"rc":"error"}}"#;
        match decode_envelope::<Vec<serde_json::Value>>(body) {
            Err(Error::RequestRejected { message }) => assert_eq!(message, "rc=error"),
            other => panic!("expected RequestRejected, got: {other:?}"),
        }
    }

    #[test]
    fn envelope_without_data_is_malformed() {
        let body = r#"{"meta":{"rc":"ok"}}"#;
        let result = decode_envelope::<Vec<serde_json::Value>>(body);
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn envelope_with_null_data_is_malformed() {
        let body = r#"{"meta":{"rc":"ok"},"data":null}"#;
        let result = decode_envelope::<Vec<serde_json::Value>>(body);
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn undecodable_payload_is_malformed() {
        let body = r#"{"meta":{"rc":"ok"},"data":{"not":"a list"}}"#;
        let result = decode_envelope::<Vec<String>>(body);
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let result = decode_envelope::<Vec<String>>("<html>login</html>");
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn ok_envelope_decodes_payload_and_keeps_meta() {
        let body = r#"{"meta":{"rc":"ok","server_version":"6.0.43","up":true},"data":["a","b"]}"#;
        let resp = decode_envelope::<Vec<String>>(body).unwrap();
        assert_eq!(resp.data, vec!["a", "b"]);
        assert_eq!(resp.meta.server_version.as_deref(), Some("6.0.43"));
        assert_eq!(resp.meta.up, Some(true));
    }
}
