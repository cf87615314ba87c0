//! Async client for the Eaton network-management-card REST API
//! (`/rest/mbdetnrs/2.0`).
//!
//! [`PduClient`] owns the HTTPS connection and the bearer-token session
//! for one PDU, logging in on demand and classifying failures into
//! [`Error::Authentication`] and [`Error::Api`]. The telemetry methods
//! (`overall_power`, `outlets`, `branches`, `device_info`, …) map the
//! card's nested resource documents into the flat records in [`model`].
//!
//! ```no_run
//! use pductl_api::{PduClient, PduConfig};
//! use secrecy::SecretString;
//!
//! # async fn demo() -> Result<(), pductl_api::Error> {
//! let config = PduConfig::new("pdu.rack.lan", "admin", SecretString::from("secret".to_owned()));
//! let client = PduClient::new(config)?;
//! let watts = client.overall_power().await?;
//! client.logout().await;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod model;
mod power;
mod transport;

pub use client::PduClient;
pub use config::PduConfig;
pub use error::Error;
pub use model::{Branch, DeviceInfo, Outlet, PowerDetail, PowerSummary};
pub use transport::TransportConfig;
