//! CLI error types with miette diagnostics.
//!
//! Maps `pductl_api::Error` into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the PDU")]
    #[diagnostic(
        code(pductl::connection_failed),
        help(
            "Check that the management card is reachable on its HTTPS port.\n\
             Self-signed certificates are accepted unless --verify-tls is set."
        )
    )]
    Connection {
        #[source]
        source: pductl_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(pductl::auth_failed),
        help(
            "Verify the PDU username and password.\n\
             Store the password with: pductl config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(pductl::no_credentials),
        help(
            "Pass --username and --password, set PDUCTL_USERNAME / PDUCTL_PASSWORD,\n\
             or store a password with: pductl config set-password --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("PDU API error ({status}): {message}")]
    #[diagnostic(code(pductl::api_error))]
    ApiError { status: u16, message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No PDU host configured")]
    #[diagnostic(
        code(pductl::no_host),
        help(
            "Pass --host, set PDUCTL_HOST, or create a profile at:\n{path}"
        )
    )]
    NoHost { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pductl::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(pductl::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pductl::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NoHost { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── pductl_api::Error → CliError mapping ─────────────────────────────

impl From<pductl_api::Error> for CliError {
    fn from(err: pductl_api::Error) -> Self {
        match err {
            pductl_api::Error::Authentication { message } => Self::AuthFailed { message },

            pductl_api::Error::Api { status, message } => Self::ApiError { status, message },

            err @ pductl_api::Error::Transport(_) => Self::Connection { source: err },

            pductl_api::Error::InvalidUrl(parse_err) => Self::Validation {
                field: "host".into(),
                reason: parse_err.to_string(),
            },

            pductl_api::Error::Config { message } => Self::Validation {
                field: "connection".into(),
                reason: message,
            },
        }
    }
}
