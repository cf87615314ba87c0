// PDU HTTP client
//
// Wraps `reqwest::Client` with the card's URL layout, bearer-token
// session handling, and response classification. Telemetry endpoints
// are implemented as inherent methods in `power.rs` to keep this module
// focused on transport mechanics.

use std::sync::RwLock;

use reqwest::header;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::config::PduConfig;
use crate::error::Error;
use crate::transport::TransportConfig;

/// All card resources live under this prefix.
const API_BASE: &str = "/rest/mbdetnrs/2.0";

/// The login endpoint checks CORS-style request headers that the
/// authenticated API does not; this UA matches what the card's own web
/// interface sends.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/79.0.3945.130 Safari/537.36";

/// Bearer token plus the server-issued session resource path.
///
/// `handle` is only meaningful while `token` is present; both are set
/// together on login and cleared together on logout or expiry.
#[derive(Debug, Default)]
struct Session {
    token: Option<String>,
    handle: Option<String>,
}

/// Async client for one PDU network-management card.
///
/// Owns the HTTPS connection and the login session. Requests run
/// strictly sequentially; share a client across tasks only with
/// external synchronization.
pub struct PduClient {
    http: reqwest::Client,
    base_url: Url,
    config: PduConfig,
    session: RwLock<Session>,
}

impl PduClient {
    /// Create a client from connection settings.
    ///
    /// The `Host` header (override or literal host) is installed as a
    /// default header so every request carries it, including through
    /// SSH tunnels where the TCP endpoint differs from the hostname.
    pub fn new(config: PduConfig) -> Result<Self, Error> {
        let base_url = config.base_url()?;

        let mut headers = header::HeaderMap::new();
        let host_value =
            header::HeaderValue::from_str(config.host_header()).map_err(|_| Error::Config {
                message: format!("invalid Host header value: {}", config.host_header()),
            })?;
        headers.insert(header::HOST, host_value);

        let transport = TransportConfig {
            verify_certificates: config.verify_certificates,
            timeout: config.timeout,
        };
        let http = transport.build_client_with_headers(headers)?;

        Ok(Self::with_client(http, base_url, config))
    }

    /// Create a client with a pre-built `reqwest::Client` and an explicit
    /// base URL.
    ///
    /// Use this when the transport is managed elsewhere (tests against a
    /// local mock, unusual tunnel setups).
    pub fn with_client(http: reqwest::Client, base_url: Url, config: PduConfig) -> Self {
        Self {
            http,
            base_url,
            config,
            session: RwLock::new(Session::default()),
        }
    }

    /// The configured connection settings.
    pub fn config(&self) -> &PduConfig {
        &self.config
    }

    // ── Session state ────────────────────────────────────────────────

    /// Whether a login token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .expect("session lock poisoned")
            .token
            .is_some()
    }

    fn token(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    fn session_handle(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .handle
            .clone()
    }

    fn store_session(&self, token: String, handle: Option<String>) {
        let mut session = self.session.write().expect("session lock poisoned");
        session.token = Some(token);
        session.handle = handle;
    }

    fn clear_session(&self) {
        let mut session = self.session.write().expect("session lock poisoned");
        session.token = None;
        session.handle = None;
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Log in with the configured credentials and store the issued token.
    ///
    /// Returns the access token on success. Fails with
    /// [`Error::Authentication`] on rejection or an unusable response
    /// body.
    pub async fn authenticate(&self) -> Result<String, Error> {
        let url = self.url("/oauth2/token/")?;
        debug!("POST {url} (login)");

        let body = json!({
            "username": self.config.username,
            "password": self.config.password.expose_secret(),
        });

        let resp = self
            .browser_headers(self.http.post(url))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let raw = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login rejected (HTTP {status}): {raw}"),
            });
        }

        let data: Value = serde_json::from_str(&raw).map_err(|e| Error::Authentication {
            message: format!("invalid response from server: {e}"),
        })?;

        let token = data
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Authentication {
                message: "invalid response from server: missing access_token".into(),
            })?
            .to_owned();
        let handle = data
            .get("session")
            .and_then(Value::as_str)
            .map(str::to_owned);

        self.store_session(token.clone(), handle);
        debug!("login successful");
        Ok(token)
    }

    /// Log in only if no token is held. Idempotent — an existing token is
    /// never refreshed here.
    pub async fn ensure_authenticated(&self) -> Result<(), Error> {
        if self.is_authenticated() {
            return Ok(());
        }
        self.authenticate().await?;
        Ok(())
    }

    /// End the session: delete the server-side session resource (if one
    /// was issued) and drop the token.
    ///
    /// Never fails. The delete is best-effort — the session may already
    /// have expired server-side — and local state is cleared regardless.
    pub async fn logout(&self) {
        if !self.is_authenticated() {
            return;
        }

        if let Some(handle) = self.session_handle() {
            if let Err(err) = self.delete(&handle).await {
                debug!("logout cleanup failed: {err}");
            }
        }

        self.clear_session();
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// GET a card resource, logging in first if needed.
    ///
    /// Returns the decoded JSON body; a 2xx body that is not JSON comes
    /// back unchanged as a JSON string value.
    pub async fn get(&self, path: &str) -> Result<Value, Error> {
        self.ensure_authenticated().await?;

        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.auth_headers(self.http.get(url))?.send().await?;
        self.handle_response(resp).await
    }

    /// POST a JSON body to a card resource, logging in first if needed.
    pub async fn post(&self, path: &str, body: &(impl Serialize + Sync)) -> Result<Value, Error> {
        self.ensure_authenticated().await?;

        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .auth_headers(self.http.post(url))?
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// DELETE a card resource. Only used while authenticated (logout).
    pub(crate) async fn delete(&self, path: &str) -> Result<Value, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.auth_headers(self.http.delete(url))?.send().await?;
        self.handle_response(resp).await
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Build a full URL for a path under the card's API prefix.
    fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{API_BASE}{path}")).map_err(Error::InvalidUrl)
    }

    /// Headers for authenticated API calls.
    fn auth_headers(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let token = self.token().ok_or_else(|| Error::Authentication {
            message: "no session token held".into(),
        })?;
        Ok(builder
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/json"))
    }

    /// Browser-emulation headers for the login endpoint.
    fn browser_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let host = self.config.host_header();
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, format!("https://{host}"))
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "same-origin")
    }

    /// Classify a response, shared by all verbs.
    ///
    /// - 2xx: decode JSON, or fall back to the raw text (some endpoints
    ///   legitimately return plain bodies).
    /// - 401/403: clear the token so the next call re-authenticates, and
    ///   surface the failure. The original request is NOT retried after
    ///   re-login — callers see exactly one authentication error per
    ///   expired-token call.
    /// - anything else: prefer the card's `description` field for the
    ///   message, else the raw body.
    async fn handle_response(&self, resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            self.clear_session();
            return Err(Error::Authentication {
                message: "token expired or invalid".into(),
            });
        }

        let raw = resp.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw)));
        }

        let message = serde_json::from_str::<Value>(&raw)
            .ok()
            .and_then(|v| {
                v.get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or(raw);

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}
