// HTTPS transport construction.
//
// One `reqwest::Client` per `PduClient`, built once and reused for the
// client's lifetime; the underlying connection is established lazily on
// the first request and pooled afterwards.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::error::Error;

/// Settings for building the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Validate the server certificate chain. When `false` the client is
    /// built with `danger_accept_invalid_certs` — explicitly insecure,
    /// required for the self-signed certificates PDU firmware ships with.
    pub verify_certificates: bool,

    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    /// Build a `reqwest::Client` with no extra default headers.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(HeaderMap::new())
    }

    /// Build a `reqwest::Client` that sends `headers` on every request.
    ///
    /// Forced to HTTP/1.1: the management card speaks nothing newer, and
    /// a caller-supplied `Host` default header is only honored on the
    /// wire for HTTP/1.1 requests.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .http1_only()
            .default_headers(headers);

        if !self.verify_certificates {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(Error::Transport)
    }
}
