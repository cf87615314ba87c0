// Power telemetry endpoints
//
// Inherent methods on `PduClient` that walk the card's resource graph
// and map the documents into flat records. Stateless — every call
// fetches fresh data.

use serde_json::Value;

use crate::client::PduClient;
use crate::error::Error;
use crate::model::{Branch, DeviceInfo, Outlet, PowerDetail, PowerSummary};

const PDU_ROOT: &str = "/powerDistributions/1";
const INPUT: &str = "/powerDistributions/1/inputs/1";
const OUTLETS: &str = "/powerDistributions/1/outlets";
const BRANCHES: &str = "/powerDistributions/1/branches";

impl PduClient {
    /// Overall power draw of the PDU in watts, if the card reports it.
    pub async fn overall_power(&self) -> Result<Option<f64>, Error> {
        let input = self.get(INPUT).await?;
        Ok(input.pointer("/measures/activePower").and_then(Value::as_f64))
    }

    /// Full input-feed measures plus the per-outlet breakdown.
    pub async fn detailed_power_info(&self) -> Result<PowerDetail, Error> {
        let input = self.get(INPUT).await?;
        let overall = PowerSummary::from_resource(&input);
        let outlets = self.outlets().await?;
        Ok(PowerDetail { overall, outlets })
    }

    /// Per-outlet power records.
    ///
    /// The collection endpoint only lists member references, so each
    /// outlet costs one extra GET; the calls run serially.
    pub async fn outlets(&self) -> Result<Vec<Outlet>, Error> {
        let listing = self.get(OUTLETS).await?;

        let mut outlets = Vec::new();
        for member_id in collection_member_ids(&listing) {
            let detail = self.get(&format!("{OUTLETS}/{member_id}")).await?;
            outlets.push(Outlet::from_resource(&member_id, &detail));
        }
        Ok(outlets)
    }

    /// Per-branch power records; same walk as [`outlets`](Self::outlets).
    pub async fn branches(&self) -> Result<Vec<Branch>, Error> {
        let listing = self.get(BRANCHES).await?;

        let mut branches = Vec::new();
        for member_id in collection_member_ids(&listing) {
            let detail = self.get(&format!("{BRANCHES}/{member_id}")).await?;
            branches.push(Branch::from_resource(&member_id, &detail));
        }
        Ok(branches)
    }

    /// Identity, status, and nameplate ratings of the PDU.
    pub async fn device_info(&self) -> Result<DeviceInfo, Error> {
        let root = self.get(PDU_ROOT).await?;
        Ok(DeviceInfo::from_resource(&root))
    }
}

/// Member ids of a card collection document.
///
/// Honors the declared `members@count` — a zero (or absent) count means
/// no members, regardless of the `members` array. Each id is the
/// trailing path segment of the member's `@id` reference.
fn collection_member_ids(listing: &Value) -> Vec<String> {
    let count = listing
        .get("members@count")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if count == 0 {
        return Vec::new();
    }

    listing
        .get("members")
        .and_then(Value::as_array)
        .map(|members| {
            members
                .iter()
                .filter_map(|member| {
                    member
                        .get("@id")
                        .and_then(Value::as_str)
                        .and_then(|id| id.rsplit('/').next())
                        .map(str::to_owned)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::collection_member_ids;

    #[test]
    fn member_ids_come_from_reference_paths() {
        let listing = json!({
            "members@count": 2,
            "members": [
                { "@id": "/rest/mbdetnrs/2.0/powerDistributions/1/outlets/1" },
                { "@id": "/rest/mbdetnrs/2.0/powerDistributions/1/outlets/2" }
            ]
        });

        assert_eq!(collection_member_ids(&listing), vec!["1", "2"]);
    }

    #[test]
    fn zero_count_short_circuits_members() {
        let listing = json!({
            "members@count": 0,
            "members": [{ "@id": ".../outlets/9" }]
        });

        assert!(collection_member_ids(&listing).is_empty());
    }

    #[test]
    fn absent_count_means_empty() {
        assert!(collection_member_ids(&json!({})).is_empty());
    }

    #[test]
    fn members_without_references_are_skipped() {
        let listing = json!({
            "members@count": 2,
            "members": [{ "@id": ".../branches/1" }, { "name": "stray" }]
        });

        assert_eq!(collection_member_ids(&listing), vec!["1"]);
    }
}
