// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface to the router-client library.
//!
//! The bridge does not speak to the router itself. It builds a client from
//! [`ConnectionParams`] and drives it through the [`RouterClient`] trait; the
//! client owns the SSH/Telnet session, authentication, and the parsing of
//! router command output.

mod params;

pub use params::{AuthConfig, ConnectionParams, ConnectionType, Mode, Settings};

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::ClientError;

/// Router information groups readable from nvram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NvramInfo {
    /// MAC address printed on the device label (`label_mac`).
    LabelMac,
    /// Firmware version and build number (`firmver`, `buildno`).
    Firmware,
    /// Product model name (`model`).
    Model,
}

impl NvramInfo {
    /// Returns the group name understood by the client library.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LabelMac => "LABEL_MAC",
            Self::Firmware => "FIRMWARE",
            Self::Model => "MODEL",
        }
    }
}

/// Network interface a device is attached to, as reported by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterfaceInfo {
    /// Interface name, e.g. `eth0` or `wl0.1`.
    #[serde(default)]
    pub name: Option<String>,
}

/// A device entry returned by [`RouterClient::get_connected_devices`].
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::client::ClientDevice;
///
/// let json = r#"{"ip": "10.0.0.5", "name": "phone", "interface": {"name": "eth0"}}"#;
/// let device: ClientDevice = serde_json::from_str(json).unwrap();
/// assert_eq!(device.interface.name.as_deref(), Some("eth0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientDevice {
    /// IPv4 address, if one is assigned.
    #[serde(default)]
    pub ip: Option<String>,
    /// Hostname from the lease table or DNS cache.
    #[serde(default)]
    pub name: Option<String>,
    /// Interface the device was seen on.
    #[serde(default)]
    pub interface: InterfaceInfo,
}

/// Operations the bridge needs from a router-client library.
///
/// Metric methods return `Ok(None)` when the router cannot currently
/// provide that family. Implementations decide for themselves whether they
/// are safe to share between concurrent requests.
#[allow(async_fn_in_trait)]
pub trait RouterClient {
    /// Opens the session to the router.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the session cannot be established.
    async fn connect(&mut self) -> Result<(), ClientError>;

    /// Closes the session.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the session cannot be closed cleanly.
    async fn disconnect(&mut self) -> Result<(), ClientError>;

    /// Returns whether a session is currently open.
    fn is_connected(&self) -> bool;

    /// Lists known devices keyed by MAC address in the router's own format.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the device tables cannot be read.
    async fn get_connected_devices(
        &self,
        reachable: bool,
    ) -> Result<Option<HashMap<String, ClientDevice>>, ClientError>;

    /// Reads one group of nvram values.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if nvram cannot be read.
    async fn get_nvram(
        &self,
        info: NvramInfo,
    ) -> Result<Option<HashMap<String, String>>, ClientError>;

    /// Reads temperatures in °C keyed by sensor name.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    async fn get_temperature(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError>;

    /// Reads cumulative WAN transfer in bytes, keyed by direction (`rx`, `tx`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    async fn total_transfer(&self) -> Result<BTreeMap<String, u64>, ClientError>;

    /// Reads current WAN transfer rates in bytes per second, keyed by direction.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    async fn get_current_transfer_rates(
        &self,
    ) -> Result<Option<BTreeMap<String, f64>>, ClientError>;

    /// Reads 1, 5 and 15 minute load averages.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    async fn get_loadavg(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError>;
}
