//! Outlet command handler.

use pductl_api::{Outlet, PduClient};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, fmt_measure};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct OutletRow {
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
    #[tabled(rename = "PF")]
    power_factor: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&Outlet> for OutletRow {
    fn from(o: &Outlet) -> Self {
        Self {
            id: o.id.clone(),
            name: o.name.clone(),
            physical: o.physical_name.clone().unwrap_or_default(),
            watts: fmt_measure(o.watts),
            current: fmt_measure(o.current),
            power_factor: fmt_measure(o.power_factor),
            state: o.state.to_owned(),
        }
    }
}

/// Drop outlets without measurable load. Presentation policy for the
/// human views only — structured output always carries every outlet.
pub(crate) fn with_load(outlets: Vec<Outlet>) -> Vec<Outlet> {
    outlets
        .into_iter()
        .filter(|o| o.watts.is_some_and(|w| w > 0.0))
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &PduClient, global: &GlobalOpts) -> Result<(), CliError> {
    let mut outlets = client.outlets().await?;

    if matches!(global.output, OutputFormat::Table) {
        outlets = with_load(outlets);
    }

    let out = output::render_list(&global.output, &outlets, |o| OutletRow::from(o), |o| o.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
