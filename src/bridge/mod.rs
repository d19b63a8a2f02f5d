// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The router bridge.
//!
//! A [`RouterBridge`] owns one router client and turns its raw answers into
//! records the host platform can store as sensor state. It has two states,
//! connected and disconnected, and only moves between them when the caller
//! invokes [`connect`](RouterBridge::connect) or
//! [`disconnect`](RouterBridge::disconnect). Polling, retry and timeouts
//! belong to the caller.

mod device;
mod identity;

pub use device::ConnectedDevice;
pub use identity::RouterIdentity;

use std::collections::{BTreeMap, HashMap};

use crate::client::{ConnectionParams, NvramInfo, RouterClient};
use crate::config::{BridgeConfig, BridgeOptions};
use crate::error::{ClientError, Error};
use crate::sensors::{SensorDescriptor, SensorFamily, SensorReadings, SensorValue};
use crate::types::format_mac;

/// Adapter between the host platform and a router client.
///
/// # Examples
///
/// ```no_run
/// # use std::collections::{BTreeMap, HashMap};
/// # use asuswrt_bridge::{ClientDevice, ClientError, ConnectionParams, NvramInfo, RouterClient};
/// # struct MyClient;
/// # impl MyClient {
/// #     fn from_params(_params: ConnectionParams) -> Self { Self }
/// # }
/// # impl RouterClient for MyClient {
/// #     async fn connect(&mut self) -> Result<(), ClientError> { Ok(()) }
/// #     async fn disconnect(&mut self) -> Result<(), ClientError> { Ok(()) }
/// #     fn is_connected(&self) -> bool { true }
/// #     async fn get_connected_devices(
/// #         &self,
/// #         _reachable: bool,
/// #     ) -> Result<Option<HashMap<String, ClientDevice>>, ClientError> { Ok(None) }
/// #     async fn get_nvram(
/// #         &self,
/// #         _info: NvramInfo,
/// #     ) -> Result<Option<HashMap<String, String>>, ClientError> { Ok(None) }
/// #     async fn get_temperature(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError> {
/// #         Ok(None)
/// #     }
/// #     async fn total_transfer(&self) -> Result<BTreeMap<String, u64>, ClientError> {
/// #         Ok(BTreeMap::new())
/// #     }
/// #     async fn get_current_transfer_rates(
/// #         &self,
/// #     ) -> Result<Option<BTreeMap<String, f64>>, ClientError> { Ok(None) }
/// #     async fn get_loadavg(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError> {
/// #         Ok(None)
/// #     }
/// # }
/// use asuswrt_bridge::{BridgeConfig, RouterBridge};
///
/// # async fn example() -> asuswrt_bridge::Result<()> {
/// let config = BridgeConfig::new("192.168.1.1", "admin").with_password("secret");
/// let mut bridge = RouterBridge::new(&config, None, MyClient::from_params);
///
/// bridge.connect().await;
/// if bridge.is_connected() {
///     for (mac, device) in bridge.get_connected_devices().await? {
///         println!("{mac}: {:?}", device.ip);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RouterBridge<C: RouterClient> {
    client: C,
    host: String,
    configuration_url: String,
    identity: RouterIdentity,
}

impl<C: RouterClient> RouterBridge<C> {
    /// Builds a bridge without connecting.
    ///
    /// The configuration is translated into [`ConnectionParams`] and handed
    /// to `factory`, which creates the client.
    #[must_use]
    pub fn new<F>(config: &BridgeConfig, options: Option<&BridgeOptions>, factory: F) -> Self
    where
        F: FnOnce(ConnectionParams) -> C,
    {
        let params = ConnectionParams::from_config(config, options);
        Self::with_client(&config.host, factory(params))
    }

    /// Wraps an already created client.
    #[must_use]
    pub fn with_client(host: impl Into<String>, client: C) -> Self {
        let host = host.into();
        Self {
            configuration_url: format!("http://{host}"),
            host,
            client,
            identity: RouterIdentity::default(),
        }
    }

    /// Returns the configured router host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the URL of the router's web interface.
    #[must_use]
    pub fn configuration_url(&self) -> &str {
        &self.configuration_url
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns whether the client currently holds an open session.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    // ========== Identity ==========

    /// Returns the router identity discovered so far.
    #[must_use]
    pub fn identity(&self) -> &RouterIdentity {
        &self.identity
    }

    /// Returns the firmware version, once known.
    #[must_use]
    pub fn firmware(&self) -> Option<&str> {
        self.identity.firmware.as_deref()
    }

    /// Returns the model name, once known.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.identity.model.as_deref()
    }

    /// Returns the canonical label MAC address, once known.
    #[must_use]
    pub fn label_mac(&self) -> Option<&str> {
        self.identity.label_mac.as_deref()
    }

    /// Forgets the router identity so the next successful connect reads it
    /// again.
    pub fn reset_identity(&mut self) {
        self.identity = RouterIdentity::default();
    }

    // ========== Connection ==========

    /// Connects to the router and reads any identity field not yet known.
    ///
    /// Failures are logged, never returned. After a failed connect the bridge
    /// stays disconnected and the call can simply be repeated.
    pub async fn connect(&mut self) {
        if let Err(e) = self.client.connect().await {
            tracing::error!(host = %self.host, error = %e, "Unable to connect to router");
            return;
        }
        tracing::debug!(host = %self.host, "Connected to router");

        if self.identity.label_mac.is_none() {
            self.identity.label_mac = self.read_identity(NvramInfo::LabelMac).await;
        }
        if self.identity.firmware.is_none() {
            self.identity.firmware = self.read_identity(NvramInfo::Firmware).await;
        }
        if self.identity.model.is_none() {
            self.identity.model = self.read_identity(NvramInfo::Model).await;
        }
    }

    /// Closes the router session.
    ///
    /// # Errors
    ///
    /// Returns error if the client fails to close the session.
    pub async fn disconnect(&mut self) -> Result<(), Error> {
        self.client.disconnect().await?;
        tracing::debug!(host = %self.host, "Disconnected from router");
        Ok(())
    }

    async fn read_identity(&self, info: NvramInfo) -> Option<String> {
        let nvram = match self.client.get_nvram(info).await {
            Ok(Some(nvram)) => nvram,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    host = %self.host,
                    info = info.as_str(),
                    error = %e,
                    "Failed to read router info"
                );
                return None;
            }
        };

        let value = match info {
            NvramInfo::LabelMac => identity::parse_label_mac(&nvram),
            NvramInfo::Firmware => identity::parse_firmware(&nvram),
            NvramInfo::Model => identity::parse_model(&nvram),
        };
        if let Some(value) = &value {
            tracing::debug!(
                host = %self.host,
                info = info.as_str(),
                value = %value,
                "Read router info"
            );
        }
        value
    }

    // ========== Devices ==========

    /// Returns reachable devices keyed by canonical MAC address.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot list devices.
    pub async fn get_connected_devices(&self) -> Result<HashMap<String, ConnectedDevice>, Error> {
        let Some(devices) = self.client.get_connected_devices(true).await? else {
            return Ok(HashMap::new());
        };
        tracing::trace!(host = %self.host, count = devices.len(), "Fetched connected devices");

        Ok(devices
            .into_iter()
            .map(|(mac, device)| (format_mac(&mac), ConnectedDevice::from(device)))
            .collect())
    }

    // ========== Sensors ==========

    /// Describes the sensors each family offers right now.
    ///
    /// Temperature sensors are queried live, so their list can differ between
    /// calls.
    ///
    /// # Errors
    ///
    /// Returns error if the temperature query fails.
    pub async fn get_available_sensors(
        &self,
    ) -> Result<BTreeMap<SensorFamily, SensorDescriptor>, Error> {
        let temperatures = self.client.get_temperature().await?.unwrap_or_default();

        Ok(SensorFamily::ALL
            .into_iter()
            .map(|family| {
                let descriptor = match family {
                    SensorFamily::Temperatures => {
                        SensorDescriptor::discovered(family, temperatures.keys().cloned())
                    }
                    _ => SensorDescriptor::declared(family),
                };
                (family, descriptor)
            })
            .collect())
    }

    /// Reads the live values of one family.
    ///
    /// Returns `None` when the family currently has no data. Byte counters are
    /// always present.
    ///
    /// # Errors
    ///
    /// Returns error if the client request fails.
    pub async fn read_sensors(
        &self,
        family: SensorFamily,
    ) -> Result<Option<SensorReadings>, Error> {
        let readings = match family {
            SensorFamily::Bytes => Some(counters(self.get_byte_counters().await?)),
            SensorFamily::LoadAvg => self.get_load_averages().await?.map(gauges),
            SensorFamily::Rates => self.get_rates().await?.map(gauges),
            SensorFamily::Temperatures => self.get_temperatures().await?.map(gauges),
        };
        Ok(readings)
    }

    /// Returns cumulative WAN transfer as `sensor_{direction}_bytes`.
    ///
    /// # Errors
    ///
    /// Returns error if the client request fails.
    pub async fn get_byte_counters(&self) -> Result<BTreeMap<String, u64>, Error> {
        let items = self.client.total_transfer().await?;
        Ok(rename(items, "bytes"))
    }

    /// Returns current WAN transfer rates as `sensor_{direction}_rates`, or
    /// `None` when the router has no rate sample yet.
    ///
    /// # Errors
    ///
    /// Returns error if the client request fails.
    pub async fn get_rates(&self) -> Result<Option<BTreeMap<String, f64>>, Error> {
        let items = non_empty(self.client.get_current_transfer_rates().await)?;
        Ok(items.map(|items| rename(items, "rates")))
    }

    /// Returns load averages as reported by the client.
    ///
    /// # Errors
    ///
    /// Returns error if the client request fails.
    pub async fn get_load_averages(&self) -> Result<Option<BTreeMap<String, f64>>, Error> {
        non_empty(self.client.get_loadavg().await)
    }

    /// Returns temperatures as reported by the client.
    ///
    /// # Errors
    ///
    /// Returns error if the client request fails.
    pub async fn get_temperatures(&self) -> Result<Option<BTreeMap<String, f64>>, Error> {
        non_empty(self.client.get_temperature().await)
    }
}

fn rename<V>(items: BTreeMap<String, V>, suffix: &str) -> BTreeMap<String, V> {
    items
        .into_iter()
        .map(|(key, value)| (format!("sensor_{key}_{suffix}"), value))
        .collect()
}

fn non_empty<V>(
    result: Result<Option<BTreeMap<String, V>>, ClientError>,
) -> Result<Option<BTreeMap<String, V>>, Error> {
    Ok(result?.filter(|items| !items.is_empty()))
}

fn counters(items: BTreeMap<String, u64>) -> SensorReadings {
    items
        .into_iter()
        .map(|(key, value)| (key, SensorValue::Counter(value)))
        .collect()
}

fn gauges(items: BTreeMap<String, f64>) -> SensorReadings {
    items
        .into_iter()
        .map(|(key, value)| (key, SensorValue::Gauge(value)))
        .collect()
}
