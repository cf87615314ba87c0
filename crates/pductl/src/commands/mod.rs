//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod auth;
pub mod branches;
pub mod config_cmd;
pub mod info;
pub mod outlets;
pub mod power;

use pductl_api::PduClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a PDU-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &PduClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Power => power::overall(client, global).await,
        Command::Detailed => power::detailed(client, global).await,
        Command::Outlets => outlets::handle(client, global).await,
        Command::Branches => branches::handle(client, global).await,
        Command::Info => info::handle(client, global).await,
        Command::Auth => auth::handle(client, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
