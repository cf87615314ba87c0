//! Branch command handler.

use pductl_api::{Branch, PduClient};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, fmt_measure};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BranchRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Physical")]
    physical: String,
    #[tabled(rename = "Watts")]
    watts: String,
    #[tabled(rename = "Current (A)")]
    current: String,
    #[tabled(rename = "Voltage (V)")]
    voltage: String,
    #[tabled(rename = "PF")]
    power_factor: String,
}

impl From<&Branch> for BranchRow {
    fn from(b: &Branch) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            physical: b.physical_name.clone().unwrap_or_default(),
            watts: fmt_measure(b.watts),
            current: fmt_measure(b.current),
            voltage: fmt_measure(b.voltage),
            power_factor: fmt_measure(b.power_factor),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &PduClient, global: &GlobalOpts) -> Result<(), CliError> {
    let mut branches = client.branches().await?;

    // Human view only shows branches carrying current.
    if matches!(global.output, OutputFormat::Table) {
        branches.retain(|b| b.current.is_some_and(|c| c > 0.0));
    }

    let out = output::render_list(&global.output, &branches, |b| BranchRow::from(b), |b| b.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
