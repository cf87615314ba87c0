//! Authentication self-test handler.

use owo_colors::OwoColorize;
use pductl_api::PduClient;
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct AuthReport {
    status: &'static str,
    token_present: bool,
    token_length: usize,
}

/// `pductl auth` — log in and report on the issued token without
/// touching any telemetry endpoint.
pub async fn handle(client: &PduClient, global: &GlobalOpts) -> Result<(), CliError> {
    let token = client.authenticate().await?;

    let report = AuthReport {
        status: "success",
        token_present: !token.is_empty(),
        token_length: token.len(),
    };
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            let status = if color {
                r.status.green().to_string()
            } else {
                r.status.to_owned()
            };
            format!(
                "Status:        {status}\nToken present: {}\nToken length:  {}",
                r.token_present, r.token_length
            )
        },
        |r| r.status.to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
