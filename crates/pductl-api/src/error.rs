use thiserror::Error;

/// Unified error type for the PDU API client.
#[derive(Debug, Error)]
pub enum Error {
    /// Login was rejected, the login response was unusable, or an
    /// authenticated call came back 401/403 (which also clears the
    /// stored token).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Any other non-2xx response. The message favors the card's
    /// `description` field, falling back to the raw body text.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Connection-level failure from the HTTP stack.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A request URL could not be constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The connection configuration is unusable (e.g. a Host header
    /// override that is not a valid header value).
    #[error("invalid configuration: {message}")]
    Config { message: String },
}
