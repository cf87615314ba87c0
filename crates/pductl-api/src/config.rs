use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::Error;

/// Connection settings for one PDU network-management card.
///
/// Immutable once handed to [`PduClient`](crate::PduClient) — a client
/// talks to exactly one card for its whole lifetime.
#[derive(Debug, Clone)]
pub struct PduConfig {
    /// Hostname or IP address of the management card.
    pub host: String,

    /// HTTPS port.
    pub port: u16,

    /// Account username.
    pub username: String,

    /// Account password. Held as a secret; only exposed at login time.
    pub password: SecretString,

    /// Verify the card's TLS certificate chain. Off by default — PDU
    /// firmware ships with self-signed certificates.
    pub verify_certificates: bool,

    /// Host header override for tunneled access, where the TCP endpoint
    /// and the logical hostname differ. Defaults to `host`.
    pub host_header: Option<String>,

    /// Optional per-request timeout. `None` means no client-side limit.
    pub timeout: Option<Duration>,
}

impl PduConfig {
    /// Config for `host` with the standard HTTPS port and verification
    /// defaults.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            port: 443,
            username: username.into(),
            password,
            verify_certificates: false,
            host_header: None,
            timeout: None,
        }
    }

    /// The value to send as the `Host` header (and login `Origin`).
    pub fn host_header(&self) -> &str {
        self.host_header.as_deref().unwrap_or(&self.host)
    }

    /// The card's base URL, `https://{host}:{port}`.
    pub fn base_url(&self) -> Result<Url, Error> {
        Url::parse(&format!("https://{}:{}", self.host, self.port)).map_err(Error::InvalidUrl)
    }
}
