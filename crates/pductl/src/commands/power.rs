//! Power command handlers: overall reading and the detailed breakdown.

use pductl_api::{PduClient, PowerDetail, PowerSummary};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, fmt_measure};

use super::outlets::{OutletRow, with_load};

#[derive(Serialize)]
struct OverallPower {
    watts: Option<f64>,
}

/// `pductl power` — one number, the PDU's active input power.
pub async fn overall(client: &PduClient, global: &GlobalOpts) -> Result<(), CliError> {
    let watts = client.overall_power().await?;
    let record = OverallPower { watts };

    let out = output::render_single(
        &global.output,
        &record,
        |r| format!("Watts: {}", fmt_measure(r.watts)),
        |r| fmt_measure(r.watts),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// `pductl detailed` — full input measures plus the outlet breakdown.
pub async fn detailed(client: &PduClient, global: &GlobalOpts) -> Result<(), CliError> {
    let detail = client.detailed_power_info().await?;

    let out = match global.output {
        OutputFormat::Table => table_view(&detail),
        OutputFormat::Json => output::render_json_pretty(&detail),
        OutputFormat::JsonCompact => output::render_json_compact(&detail),
        OutputFormat::Yaml => output::render_yaml(&detail),
        OutputFormat::Plain => fmt_measure(detail.overall.watts),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn overall_block(overall: &PowerSummary) -> String {
    [
        format!("Watts:            {}", fmt_measure(overall.watts)),
        format!("Apparent power:   {}", fmt_measure(overall.apparent_power)),
        format!("Reactive power:   {}", fmt_measure(overall.reactive_power)),
        format!("Frequency:        {}", fmt_measure(overall.frequency)),
        format!("Power factor:     {}", fmt_measure(overall.power_factor)),
        format!("Percent load:     {}", fmt_measure(overall.percent_load)),
        format!("Cumulated energy: {}", fmt_measure(overall.cumulated_energy)),
        format!("Partial energy:   {}", fmt_measure(overall.partial_energy)),
    ]
    .join("\n")
}

fn table_view(detail: &PowerDetail) -> String {
    let mut block = overall_block(&detail.overall);

    // Human view only shows outlets actually drawing power.
    let active = with_load(detail.outlets.clone());
    if !active.is_empty() {
        block.push_str("\n\n");
        block.push_str(&output::render_list(
            &OutputFormat::Table,
            &active,
            |o| OutletRow::from(o),
            |o| o.id.clone(),
        ));
    }
    block
}
