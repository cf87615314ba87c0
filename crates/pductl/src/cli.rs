//! Clap derive structures for the `pductl` CLI.
//!
//! Defines the command tree, global connection flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pductl -- power telemetry for Eaton network-managed PDUs
#[derive(Debug, Parser)]
#[command(
    name = "pductl",
    version,
    about = "Read power telemetry from Eaton network-managed PDUs",
    long_about = "Query an Eaton PDU's network-management card for overall load,\n\
        per-outlet and per-branch power, and device identity.\n\n\
        Connection settings come from flags, PDUCTL_* environment variables,\n\
        or a TOML profile.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Connection profile to use
    #[arg(long, short = 'p', env = "PDUCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// PDU hostname or IP address (overrides profile)
    #[arg(long, short = 'H', env = "PDUCTL_HOST", global = true)]
    pub host: Option<String>,

    /// HTTPS port of the management card
    #[arg(long, env = "PDUCTL_PORT", global = true)]
    pub port: Option<u16>,

    /// PDU username
    #[arg(long, short = 'u', env = "PDUCTL_USERNAME", global = true)]
    pub username: Option<String>,

    /// PDU password (prefer the keyring or PDUCTL_PASSWORD)
    #[arg(long, env = "PDUCTL_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Verify the card's TLS certificate chain (self-signed firmware
    /// certs are accepted by default)
    #[arg(long, env = "PDUCTL_VERIFY_TLS", global = true)]
    pub verify_tls: bool,

    /// Custom Host header (for SSH-tunneled access)
    #[arg(long, env = "PDUCTL_HOST_HEADER", global = true)]
    pub host_header: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PDUCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Overall power consumption in watts
    #[command(alias = "pw")]
    Power,

    /// Detailed power information including the outlet list
    #[command(alias = "det")]
    Detailed,

    /// Per-outlet power consumption
    #[command(alias = "out")]
    Outlets,

    /// Per-branch power consumption
    #[command(alias = "br")]
    Branches,

    /// PDU device identity and status
    Info,

    /// Test authentication against the PDU
    Auth,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── CONFIG ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── COMPLETIONS ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
