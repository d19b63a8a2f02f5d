// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `asuswrt_bridge` - Expose AsusWRT router state as sensor data.
//!
//! This library sits between a home-automation platform and a router-client
//! library that talks to the router over SSH or Telnet. It translates the
//! platform's config entry into client connection parameters and reshapes
//! the client's answers into stable records.
//!
//! # What the bridge reports
//!
//! - **Connected devices**: keyed by canonical MAC, with IP, hostname and
//!   attached interface
//! - **Traffic**: cumulative byte counters and current transfer rates
//! - **System**: load averages and temperatures
//! - **Identity**: firmware version, model and label MAC
//!
//! # Quick Start
//!
//! ```no_run
//! # use std::collections::{BTreeMap, HashMap};
//! # use asuswrt_bridge::{ClientDevice, ClientError, ConnectionParams, NvramInfo, RouterClient};
//! # struct SshClient;
//! # impl SshClient {
//! #     fn from_params(_params: ConnectionParams) -> Self { Self }
//! # }
//! # impl RouterClient for SshClient {
//! #     async fn connect(&mut self) -> Result<(), ClientError> { Ok(()) }
//! #     async fn disconnect(&mut self) -> Result<(), ClientError> { Ok(()) }
//! #     fn is_connected(&self) -> bool { true }
//! #     async fn get_connected_devices(
//! #         &self,
//! #         _reachable: bool,
//! #     ) -> Result<Option<HashMap<String, ClientDevice>>, ClientError> { Ok(None) }
//! #     async fn get_nvram(
//! #         &self,
//! #         _info: NvramInfo,
//! #     ) -> Result<Option<HashMap<String, String>>, ClientError> { Ok(None) }
//! #     async fn get_temperature(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError> {
//! #         Ok(None)
//! #     }
//! #     async fn total_transfer(&self) -> Result<BTreeMap<String, u64>, ClientError> {
//! #         Ok(BTreeMap::new())
//! #     }
//! #     async fn get_current_transfer_rates(
//! #         &self,
//! #     ) -> Result<Option<BTreeMap<String, f64>>, ClientError> { Ok(None) }
//! #     async fn get_loadavg(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError> {
//! #         Ok(None)
//! #     }
//! # }
//! use asuswrt_bridge::{BridgeConfig, BridgeOptions, RouterBridge};
//!
//! # async fn example() -> asuswrt_bridge::Result<()> {
//! let config = BridgeConfig::from_value(serde_json::json!({
//!     "host": "192.168.1.1",
//!     "username": "admin",
//!     "password": "secret",
//!     "protocol": "ssh",
//!     "mode": "router"
//! }))?;
//! let options = BridgeOptions::default().with_interface("ppp0");
//!
//! // `SshClient::from_params` is provided by the router-client library.
//! let mut bridge = RouterBridge::new(&config, Some(&options), SshClient::from_params);
//! bridge.connect().await;
//!
//! for (family, descriptor) in bridge.get_available_sensors().await? {
//!     if let Some(readings) = bridge.read_sensors(family).await? {
//!         println!("{family}: {readings:?} ({} sensors)", descriptor.sensors.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod sensors;
pub mod types;

pub use bridge::{ConnectedDevice, RouterBridge, RouterIdentity};
pub use client::{ClientDevice, ConnectionParams, NvramInfo, RouterClient};
pub use config::{BridgeConfig, BridgeOptions};
pub use error::{ClientError, ConfigError, Error, Result};
pub use sensors::{SensorDescriptor, SensorFamily, SensorReadings, SensorValue};
pub use types::{OperatingMode, Protocol, format_mac};
