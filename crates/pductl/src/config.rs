//! CLI configuration: TOML profiles, credential resolution, and
//! translation to `pductl_api::PduConfig` with flag overrides.
//!
//! Resolution order for every setting: CLI flag (clap also feeds the
//! matching PDUCTL_* env var into the flag) > profile > default. The
//! password additionally falls back to the system keyring before the
//! profile's plaintext field.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use pductl_api::PduConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "pductl";

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Named PDU profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            profiles: HashMap::new(),
        }
    }
}

/// A named PDU connection profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// PDU hostname or IP address.
    pub host: String,

    /// HTTPS port of the management card.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Account username.
    pub username: Option<String>,

    /// Password (plaintext — prefer the keyring or PDUCTL_PASSWORD).
    pub password: Option<String>,

    /// Verify the card's TLS certificate chain.
    #[serde(default)]
    pub verify_tls: bool,

    /// Custom Host header for tunneled access.
    pub host_header: Option<String>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_port() -> u16 {
    443
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "pductl", "pductl").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("pductl");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full `Config` from defaults + file.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file doesn't exist or is
/// unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("failed to serialize config: {e}"),
    })?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `PduConfig` from the config file, profile, and CLI overrides.
pub fn build_pdu_config(global: &GlobalOpts) -> Result<PduConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global);
    }

    // An explicitly named profile that doesn't exist is an error; the
    // implicit "default" just means no config file is in play.
    if global.profile.is_some() {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    // No profile — build from flags / env vars alone.
    let host = global.host.clone().ok_or_else(|| CliError::NoHost {
        path: config_path().display().to_string(),
    })?;
    let username = global
        .username
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;
    let password = global
        .password
        .clone()
        .map(SecretString::from)
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name,
        })?;

    let mut pdu = PduConfig::new(host, username, password);
    pdu.port = global.port.unwrap_or(443);
    pdu.verify_certificates = global.verify_tls;
    pdu.host_header = global.host_header.clone();
    Ok(pdu)
}

/// Translate a `Profile` + global flags into a `PduConfig`.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<PduConfig, CliError> {
    let host = global.host.as_deref().unwrap_or(&profile.host).to_owned();

    let username = global
        .username
        .clone()
        .or_else(|| profile.username.clone())
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let password = resolve_password(profile, profile_name, global)?;

    let mut pdu = PduConfig::new(host, username, password);
    pdu.port = global.port.unwrap_or(profile.port);
    pdu.verify_certificates = global.verify_tls || profile.verify_tls;
    pdu.host_header = global
        .host_header
        .clone()
        .or_else(|| profile.host_header.clone());
    pdu.timeout = profile.timeout.map(Duration::from_secs);
    Ok(pdu)
}

/// Password chain: CLI flag / env var → system keyring → plaintext
/// profile field.
fn resolve_password(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref pw) = global.password {
        return Ok(SecretString::from(pw.clone()));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}
