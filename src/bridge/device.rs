// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connected device records.

use serde::Serialize;

use crate::client::ClientDevice;

/// A device seen on the router's network.
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::ConnectedDevice;
/// use asuswrt_bridge::client::ClientDevice;
///
/// let raw: ClientDevice = serde_json::from_str(
///     r#"{"ip": "10.0.0.5", "name": "phone", "interface": {"name": "eth0"}}"#,
/// ).unwrap();
/// let device = ConnectedDevice::from(raw);
/// assert_eq!(device.connected_to.as_deref(), Some("eth0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectedDevice {
    /// IP address, if one is assigned.
    pub ip: Option<String>,
    /// Hostname, if known.
    pub name: Option<String>,
    /// Name of the interface the device is attached to.
    pub connected_to: Option<String>,
}

impl From<ClientDevice> for ConnectedDevice {
    fn from(device: ClientDevice) -> Self {
        Self {
            ip: device.ip,
            name: device.name,
            connected_to: device.interface.name,
        }
    }
}
