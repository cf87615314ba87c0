#![allow(clippy::unwrap_used)]
// Integration tests for the telemetry mapping over mocked card
// resources.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pductl_api::{PduClient, PduConfig};

const API: &str = "/rest/mbdetnrs/2.0";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PduClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let config = PduConfig::new(
        "pdu.example",
        "admin",
        SecretString::from("hunter2".to_owned()),
    );
    let client = PduClient::with_client(reqwest::Client::new(), base_url, config);

    Mock::given(method("POST"))
        .and(path(format!("{API}/oauth2/token/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "session": "/sessions/abc"
        })))
        .mount(&server)
        .await;

    (server, client)
}

fn api_path(suffix: &str) -> String {
    format!("{API}/powerDistributions/1{suffix}")
}

// ── Overall power ───────────────────────────────────────────────────

#[tokio::test]
async fn test_overall_power_reads_active_power() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/inputs/1")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "measures": { "activePower": 742.5 }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let watts = client.overall_power().await.unwrap();

    assert_eq!(watts, Some(742.5));
}

#[tokio::test]
async fn test_overall_power_missing_measure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/inputs/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "measures": {} })))
        .mount(&server)
        .await;

    assert_eq!(client.overall_power().await.unwrap(), None);
}

// ── Outlets ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_outlets_empty_collection_makes_no_detail_calls() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/outlets")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "members@count": 0, "members": [] })),
        )
        .mount(&server)
        .await;

    // Any detail fetch would be a bug.
    Mock::given(method("GET"))
        .and(path(api_path("/outlets/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let outlets = client.outlets().await.unwrap();

    assert!(outlets.is_empty());
}

#[tokio::test]
async fn test_outlets_fetches_each_member_once() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/outlets")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members@count": 2,
            "members": [
                { "@id": "/rest/mbdetnrs/2.0/powerDistributions/1/outlets/1" },
                { "@id": "/rest/mbdetnrs/2.0/powerDistributions/1/outlets/2" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("/outlets/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "identification": { "friendlyName": "db-server" },
            "measures": { "activePower": 120.0, "current": 0.52 },
            "status": { "switchedOn": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("/outlets/2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "2",
            "measures": { "activePower": 0.0 },
            "status": { "switchedOn": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outlets = client.outlets().await.unwrap();

    assert_eq!(outlets.len(), 2);
    assert_eq!(outlets[0].id, "1");
    assert_eq!(outlets[0].name, "db-server");
    assert_eq!(outlets[0].watts, Some(120.0));
    assert_eq!(outlets[0].state, "on");
    assert_eq!(outlets[1].id, "2");
    assert_eq!(outlets[1].state, "off");
}

#[tokio::test]
async fn test_outlet_name_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/outlets")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members@count": 1,
            "members": [
                { "@id": "/rest/mbdetnrs/2.0/powerDistributions/1/outlets/3" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("/outlets/3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "measures": { "activePower": 9.5 }
        })))
        .mount(&server)
        .await;

    let outlets = client.outlets().await.unwrap();

    assert_eq!(outlets.len(), 1);
    assert_eq!(outlets[0].name, "Outlet 3");
}

// ── Branches ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_branches_map_voltage() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/branches")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members@count": 1,
            "members": [
                { "@id": "/rest/mbdetnrs/2.0/powerDistributions/1/branches/1" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("/branches/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "identification": { "friendlyName": "feed-A", "physicalName": "L1" },
            "measures": {
                "activePower": 840.0,
                "current": 3.7,
                "voltage": 229.8,
                "powerFactor": 0.97
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let branches = client.branches().await.unwrap();

    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].name, "feed-A");
    assert_eq!(branches[0].physical_name.as_deref(), Some("L1"));
    assert_eq!(branches[0].voltage, Some(229.8));
    assert_eq!(branches[0].power_factor, Some(0.97));
}

// ── Detailed power / device info ────────────────────────────────────

#[tokio::test]
async fn test_detailed_power_info_combines_input_and_outlets() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/inputs/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "measures": {
                "activePower": 742.5,
                "apparentPower": 780.0,
                "frequency": 50.0,
                "percentLoad": 21.0
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("/outlets")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "members@count": 0 })),
        )
        .mount(&server)
        .await;

    let detail = client.detailed_power_info().await.unwrap();

    assert_eq!(detail.overall.watts, Some(742.5));
    assert_eq!(detail.overall.apparent_power, Some(780.0));
    assert_eq!(detail.overall.frequency, Some(50.0));
    assert_eq!(detail.overall.percent_load, Some(21.0));
    assert_eq!(detail.overall.reactive_power, None);
    assert!(detail.outlets.is_empty());
}

#[tokio::test]
async fn test_device_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pdu-1",
            "identification": {
                "friendlyName": "rack-pdu",
                "model": "EMAB04",
                "serialNumber": "S123",
                "partNumber": "P456",
                "vendor": "EATON",
                "firmwareVersion": "2.0.5"
            },
            "status": { "operating": "inService", "health": "ok" },
            "specifications": {
                "activePower": { "nominal": 3680.0 },
                "current": { "nominal": 16.0 },
                "voltage": { "nominal": 230.0 }
            }
        })))
        .mount(&server)
        .await;

    let info = client.device_info().await.unwrap();

    assert_eq!(info.id.as_deref(), Some("pdu-1"));
    assert_eq!(info.vendor.as_deref(), Some("EATON"));
    assert_eq!(info.serial_number.as_deref(), Some("S123"));
    assert_eq!(info.nominal_power, Some(3680.0));
}
