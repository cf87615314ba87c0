//! Device info command handler.

use owo_colors::OwoColorize;
use pductl_api::{DeviceInfo, PduClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, fmt_measure};

fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn detail(info: &DeviceInfo, color: bool) -> String {
    let health = opt(info.health.as_deref());
    let health = if color {
        if health == "ok" {
            health.green().to_string()
        } else {
            health.yellow().to_string()
        }
    } else {
        health.to_owned()
    };

    [
        format!("ID:              {}", opt(info.id.as_deref())),
        format!("Name:            {}", opt(info.name.as_deref())),
        format!("Model:           {}", opt(info.model.as_deref())),
        format!("Serial number:   {}", opt(info.serial_number.as_deref())),
        format!("Part number:     {}", opt(info.part_number.as_deref())),
        format!("Vendor:          {}", opt(info.vendor.as_deref())),
        format!("Firmware:        {}", opt(info.firmware_version.as_deref())),
        format!("Status:          {}", opt(info.operating_status.as_deref())),
        format!("Health:          {health}"),
        format!("Nominal power:   {}", fmt_measure(info.nominal_power)),
        format!("Nominal current: {}", fmt_measure(info.nominal_current)),
        format!("Nominal voltage: {}", fmt_measure(info.nominal_voltage)),
    ]
    .join("\n")
}

pub async fn handle(client: &PduClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.device_info().await?;
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &info,
        |i| detail(i, color),
        |i| {
            i.id.clone()
                .or_else(|| i.name.clone())
                .unwrap_or_default()
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
