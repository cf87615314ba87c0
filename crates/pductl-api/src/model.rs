//! Flat read-models mapped out of the card's nested resource documents.
//!
//! The card only includes fields it currently supports, so every lookup
//! tolerates missing intermediate keys: an absent path maps to `None`,
//! never a panic. Extraction goes through `serde_json::Value::pointer`.

use serde::Serialize;
use serde_json::Value;

// ── JSON path helpers ───────────────────────────────────────────────

fn number_at(value: &Value, pointer: &str) -> Option<f64> {
    value.pointer(pointer).and_then(Value::as_f64)
}

fn bool_at(value: &Value, pointer: &str) -> Option<bool> {
    value.pointer(pointer).and_then(Value::as_bool)
}

/// String at `pointer`; numeric ids are stringified.
fn string_at(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// Electrical measures of the PDU's input feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerSummary {
    /// Active power in watts.
    pub watts: Option<f64>,
    pub apparent_power: Option<f64>,
    pub reactive_power: Option<f64>,
    pub frequency: Option<f64>,
    pub power_factor: Option<f64>,
    pub percent_load: Option<f64>,
    pub cumulated_energy: Option<f64>,
    pub partial_energy: Option<f64>,
}

impl PowerSummary {
    pub fn from_resource(input: &Value) -> Self {
        Self {
            watts: number_at(input, "/measures/activePower"),
            apparent_power: number_at(input, "/measures/apparentPower"),
            reactive_power: number_at(input, "/measures/reactivePower"),
            frequency: number_at(input, "/measures/frequency"),
            power_factor: number_at(input, "/measures/powerFactor"),
            percent_load: number_at(input, "/measures/percentLoad"),
            cumulated_energy: number_at(input, "/measures/cumulatedEnergy"),
            partial_energy: number_at(input, "/measures/partialEnergy"),
        }
    }
}

/// Input-feed measures together with the full outlet list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerDetail {
    pub overall: PowerSummary,
    pub outlets: Vec<Outlet>,
}

/// One switched outlet.
///
/// Outlets carry no voltage measure — the card reports voltage at the
/// branch level only, never per outlet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlet {
    pub id: String,
    /// User-assigned name, or `"Outlet {id}"` when none is set.
    pub name: String,
    pub physical_name: Option<String>,
    pub watts: Option<f64>,
    pub current: Option<f64>,
    pub power_factor: Option<f64>,
    pub switched_on: bool,
    /// `"on"` / `"off"`, derived from `switched_on`.
    pub state: &'static str,
}

impl Outlet {
    /// Map an outlet detail document. `outlet_id` is the collection
    /// member id (trailing segment of the member's `@id`), used when the
    /// document carries no id and for the synthesized name.
    pub fn from_resource(outlet_id: &str, detail: &Value) -> Self {
        let switched_on = bool_at(detail, "/status/switchedOn").unwrap_or(false);
        Self {
            id: string_at(detail, "/id").unwrap_or_else(|| outlet_id.to_owned()),
            name: string_at(detail, "/identification/friendlyName")
                .unwrap_or_else(|| format!("Outlet {outlet_id}")),
            physical_name: string_at(detail, "/identification/physicalName"),
            watts: number_at(detail, "/measures/activePower"),
            current: number_at(detail, "/measures/current"),
            power_factor: number_at(detail, "/measures/powerFactor"),
            switched_on,
            state: if switched_on { "on" } else { "off" },
        }
    }
}

/// One metered branch circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub id: String,
    /// User-assigned name, or `"Branch {id}"` when none is set.
    pub name: String,
    pub physical_name: Option<String>,
    pub watts: Option<f64>,
    pub current: Option<f64>,
    pub voltage: Option<f64>,
    pub power_factor: Option<f64>,
}

impl Branch {
    pub fn from_resource(branch_id: &str, detail: &Value) -> Self {
        Self {
            id: string_at(detail, "/id").unwrap_or_else(|| branch_id.to_owned()),
            name: string_at(detail, "/identification/friendlyName")
                .unwrap_or_else(|| format!("Branch {branch_id}")),
            physical_name: string_at(detail, "/identification/physicalName"),
            watts: number_at(detail, "/measures/activePower"),
            current: number_at(detail, "/measures/current"),
            voltage: number_at(detail, "/measures/voltage"),
            power_factor: number_at(detail, "/measures/powerFactor"),
        }
    }
}

/// Identity, status, and nameplate ratings of the PDU itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub part_number: Option<String>,
    pub vendor: Option<String>,
    pub firmware_version: Option<String>,
    pub operating_status: Option<String>,
    pub health: Option<String>,
    pub nominal_power: Option<f64>,
    pub nominal_current: Option<f64>,
    pub nominal_voltage: Option<f64>,
}

impl DeviceInfo {
    pub fn from_resource(root: &Value) -> Self {
        Self {
            id: string_at(root, "/id"),
            name: string_at(root, "/identification/friendlyName"),
            model: string_at(root, "/identification/model"),
            serial_number: string_at(root, "/identification/serialNumber"),
            part_number: string_at(root, "/identification/partNumber"),
            vendor: string_at(root, "/identification/vendor"),
            firmware_version: string_at(root, "/identification/firmwareVersion"),
            operating_status: string_at(root, "/status/operating"),
            health: string_at(root, "/status/health"),
            nominal_power: number_at(root, "/specifications/activePower/nominal"),
            nominal_current: number_at(root, "/specifications/current/nominal"),
            nominal_voltage: number_at(root, "/specifications/voltage/nominal"),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn outlet_maps_all_fields() {
        let detail = json!({
            "id": "4",
            "identification": { "friendlyName": "rack-left", "physicalName": "A4" },
            "measures": { "activePower": 55.2, "current": 0.24, "powerFactor": 0.98 },
            "status": { "switchedOn": true }
        });

        let outlet = Outlet::from_resource("4", &detail);

        assert_eq!(outlet.id, "4");
        assert_eq!(outlet.name, "rack-left");
        assert_eq!(outlet.physical_name.as_deref(), Some("A4"));
        assert_eq!(outlet.watts, Some(55.2));
        assert_eq!(outlet.current, Some(0.24));
        assert_eq!(outlet.power_factor, Some(0.98));
        assert!(outlet.switched_on);
        assert_eq!(outlet.state, "on");
    }

    #[test]
    fn outlet_name_falls_back_to_member_id() {
        let detail = json!({ "id": 3, "measures": {} });

        let outlet = Outlet::from_resource("3", &detail);

        assert_eq!(outlet.name, "Outlet 3");
        assert_eq!(outlet.id, "3");
    }

    #[test]
    fn outlet_missing_switch_status_reads_as_off() {
        let outlet = Outlet::from_resource("1", &json!({}));

        assert!(!outlet.switched_on);
        assert_eq!(outlet.state, "off");
        assert_eq!(outlet.watts, None);
    }

    #[test]
    fn branch_maps_voltage() {
        let detail = json!({
            "id": "2",
            "measures": { "voltage": 231.4, "current": 3.1 }
        });

        let branch = Branch::from_resource("2", &detail);

        assert_eq!(branch.voltage, Some(231.4));
        assert_eq!(branch.current, Some(3.1));
        assert_eq!(branch.name, "Branch 2");
    }

    #[test]
    fn power_summary_tolerates_empty_document() {
        let summary = PowerSummary::from_resource(&json!({}));

        assert_eq!(summary, PowerSummary {
            watts: None,
            apparent_power: None,
            reactive_power: None,
            frequency: None,
            power_factor: None,
            percent_load: None,
            cumulated_energy: None,
            partial_energy: None,
        });
    }

    #[test]
    fn device_info_maps_nameplate_ratings() {
        let root = json!({
            "id": "pdu-1",
            "identification": {
                "friendlyName": "rack-pdu",
                "model": "EMAB04",
                "serialNumber": "S123",
                "vendor": "EATON",
                "firmwareVersion": "2.0.5"
            },
            "status": { "operating": "inService", "health": "ok" },
            "specifications": {
                "activePower": { "nominal": 3680.0 },
                "current": { "nominal": 16.0 },
                "voltage": { "nominal": 230.0 }
            }
        });

        let info = DeviceInfo::from_resource(&root);

        assert_eq!(info.name.as_deref(), Some("rack-pdu"));
        assert_eq!(info.model.as_deref(), Some("EMAB04"));
        assert_eq!(info.operating_status.as_deref(), Some("inService"));
        assert_eq!(info.health.as_deref(), Some("ok"));
        assert_eq!(info.nominal_power, Some(3680.0));
        assert_eq!(info.nominal_current, Some(16.0));
        assert_eq!(info.nominal_voltage, Some(230.0));
        assert_eq!(info.part_number, None);
    }
}
