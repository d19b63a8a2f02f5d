// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for `RouterBridge` against a scripted router client.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use asuswrt_bridge::client::{ConnectionParams, ConnectionType, Mode};
use asuswrt_bridge::{
    BridgeConfig, BridgeOptions, ClientDevice, ClientError, ConnectedDevice, Error, NvramInfo,
    OperatingMode, Protocol, RouterBridge, RouterClient, SensorFamily, SensorValue,
};
use serde_json::json;

// ============================================================================
// Scripted client
// ============================================================================

#[derive(Debug, Default)]
struct MockClient {
    params: Option<ConnectionParams>,
    connected: bool,
    fail_connect: bool,
    fail_disconnect: bool,
    connect_calls: usize,
    devices: Option<HashMap<String, ClientDevice>>,
    nvram: HashMap<NvramInfo, HashMap<String, String>>,
    nvram_error: Option<NvramInfo>,
    nvram_calls: AtomicUsize,
    reachable_flags: Mutex<Vec<bool>>,
    temperatures: Mutex<Option<BTreeMap<String, f64>>>,
    transfer: BTreeMap<String, u64>,
    rates: Option<BTreeMap<String, f64>>,
    loadavg: Option<BTreeMap<String, f64>>,
    fail_metrics: bool,
}

impl MockClient {
    fn with_identity() -> Self {
        let mut client = Self::default();
        client.nvram.insert(
            NvramInfo::LabelMac,
            HashMap::from([("label_mac".to_string(), "04:D9:F5:AA:BB:CC".to_string())]),
        );
        client.nvram.insert(
            NvramInfo::Firmware,
            HashMap::from([
                ("firmver".to_string(), "3.0.0.4".to_string()),
                ("buildno".to_string(), "388_24198".to_string()),
            ]),
        );
        client.nvram.insert(
            NvramInfo::Model,
            HashMap::from([("model".to_string(), "RT-AX88U".to_string())]),
        );
        client
    }

    fn metric_result<T: Clone>(&self, value: &T) -> Result<T, ClientError> {
        if self.fail_metrics {
            return Err(ClientError::CommandFailed("cat /proc/net/dev".to_string()));
        }
        Ok(value.clone())
    }
}

impl RouterClient for MockClient {
    async fn connect(&mut self) -> Result<(), ClientError> {
        self.connect_calls += 1;
        if self.fail_connect {
            return Err(ClientError::ConnectionFailed("connection refused".to_string()));
        }
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), ClientError> {
        if self.fail_disconnect {
            return Err(ClientError::Timeout(3000));
        }
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn get_connected_devices(
        &self,
        reachable: bool,
    ) -> Result<Option<HashMap<String, ClientDevice>>, ClientError> {
        self.reachable_flags.lock().push(reachable);
        self.metric_result(&self.devices)
    }

    async fn get_nvram(
        &self,
        info: NvramInfo,
    ) -> Result<Option<HashMap<String, String>>, ClientError> {
        self.nvram_calls.fetch_add(1, Ordering::SeqCst);
        if self.nvram_error == Some(info) {
            return Err(ClientError::CommandFailed("nvram get".to_string()));
        }
        Ok(self.nvram.get(&info).cloned())
    }

    async fn get_temperature(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError> {
        let temperatures = self.temperatures.lock().clone();
        self.metric_result(&temperatures)
    }

    async fn total_transfer(&self) -> Result<BTreeMap<String, u64>, ClientError> {
        self.metric_result(&self.transfer)
    }

    async fn get_current_transfer_rates(
        &self,
    ) -> Result<Option<BTreeMap<String, f64>>, ClientError> {
        self.metric_result(&self.rates)
    }

    async fn get_loadavg(&self) -> Result<Option<BTreeMap<String, f64>>, ClientError> {
        self.metric_result(&self.loadavg)
    }
}

fn bridge(client: MockClient) -> RouterBridge<MockClient> {
    RouterBridge::with_client("192.168.1.1", client)
}

fn floats(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

// ============================================================================
// Construction
// ============================================================================

mod construction {
    use super::*;

    #[test]
    fn factory_receives_translated_params() {
        let config = BridgeConfig::from_value(json!({
            "host": "router.lan",
            "username": "admin",
            "password": "secret",
            "protocol": "telnet",
            "mode": "ap",
            "port": 2323
        }))
        .unwrap();
        let options = BridgeOptions::from_value(json!({"interface": "ppp0"})).unwrap();

        let bridge = RouterBridge::new(&config, Some(&options), |params| MockClient {
            params: Some(params),
            ..MockClient::default()
        });

        let params = bridge.client().params.as_ref().unwrap();
        assert_eq!(params.host, "router.lan");
        assert_eq!(params.auth.username, "admin");
        assert_eq!(params.auth.password.as_deref(), Some("secret"));
        assert_eq!(params.auth.connection_type, ConnectionType::Telnet);
        assert_eq!(params.auth.port, Some(2323));
        assert_eq!(params.settings.mode, Mode::Ap);
        assert!(params.settings.require_ip);
        assert_eq!(params.settings.wan_interface, "ppp0");
    }

    #[test]
    fn unknown_protocol_and_mode_build_ssh_access_point() {
        let config = BridgeConfig::from_value(json!({
            "host": "router.lan",
            "username": "admin",
            "protocol": "https",
            "mode": "mesh"
        }))
        .unwrap();

        let bridge = RouterBridge::new(&config, None, |params| MockClient {
            params: Some(params),
            ..MockClient::default()
        });

        let params = bridge.client().params.as_ref().unwrap();
        assert_eq!(params.auth.connection_type, ConnectionType::Ssh);
        assert_eq!(params.settings.mode, Mode::Ap);
    }

    #[test]
    fn construction_does_not_connect() {
        let config = BridgeConfig::new("192.168.1.1", "admin")
            .with_protocol(Protocol::Ssh)
            .with_mode(OperatingMode::Router);
        let bridge = RouterBridge::new(&config, None, |_| MockClient::default());

        assert!(!bridge.is_connected());
        assert_eq!(bridge.client().connect_calls, 0);
        assert_eq!(bridge.host(), "192.168.1.1");
        assert_eq!(bridge.configuration_url(), "http://192.168.1.1");
    }
}

// ============================================================================
// Connection and identity
// ============================================================================

mod connection {
    use super::*;

    #[tokio::test]
    async fn connect_reads_identity() {
        let mut bridge = bridge(MockClient::with_identity());
        bridge.connect().await;

        assert!(bridge.is_connected());
        assert_eq!(bridge.label_mac(), Some("04:d9:f5:aa:bb:cc"));
        assert_eq!(bridge.firmware(), Some("3.0.0.4 (build 388_24198)"));
        assert_eq!(bridge.model(), Some("RT-AX88U"));
        assert!(bridge.identity().is_complete());
    }

    #[tokio::test]
    async fn failed_connect_is_swallowed() {
        let mut bridge = bridge(MockClient {
            fail_connect: true,
            ..MockClient::with_identity()
        });
        bridge.connect().await;

        assert!(!bridge.is_connected());
        assert_eq!(bridge.firmware(), None);
        assert_eq!(bridge.client().nvram_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn identity_fetched_once_across_reconnects() {
        let mut bridge = bridge(MockClient::with_identity());
        bridge.connect().await;
        bridge.disconnect().await.unwrap();
        assert!(!bridge.is_connected());
        bridge.connect().await;

        assert!(bridge.is_connected());
        assert_eq!(bridge.client().connect_calls, 2);
        assert_eq!(bridge.client().nvram_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn reset_identity_forces_refetch() {
        let mut bridge = bridge(MockClient::with_identity());
        bridge.connect().await;
        bridge.reset_identity();
        assert_eq!(bridge.model(), None);

        bridge.connect().await;
        assert_eq!(bridge.model(), Some("RT-AX88U"));
        assert_eq!(bridge.client().nvram_calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn missing_identity_fields_stay_unset_and_are_retried() {
        let mut client = MockClient::with_identity();
        client.nvram.remove(&NvramInfo::Model);
        client.nvram.insert(
            NvramInfo::Firmware,
            HashMap::from([("buildno".to_string(), "388".to_string())]),
        );
        let mut bridge = bridge(client);

        bridge.connect().await;
        assert_eq!(bridge.label_mac(), Some("04:d9:f5:aa:bb:cc"));
        assert_eq!(bridge.firmware(), None);
        assert_eq!(bridge.model(), None);

        bridge.connect().await;
        // label MAC is known, firmware and model are asked for again
        assert_eq!(bridge.client().nvram_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn identity_read_error_does_not_escape_connect() {
        let mut bridge = bridge(MockClient {
            nvram_error: Some(NvramInfo::Firmware),
            ..MockClient::with_identity()
        });
        bridge.connect().await;

        assert!(bridge.is_connected());
        assert_eq!(bridge.firmware(), None);
        assert_eq!(bridge.model(), Some("RT-AX88U"));
    }

    #[tokio::test]
    async fn disconnect_propagates_client_error() {
        let mut bridge = bridge(MockClient {
            fail_disconnect: true,
            ..MockClient::default()
        });
        bridge.connect().await;

        let err = bridge.disconnect().await.unwrap_err();
        assert!(matches!(err, Error::Client(ClientError::Timeout(3000))));
        assert!(bridge.is_connected());
    }
}

// ============================================================================
// Connected devices
// ============================================================================

mod devices {
    use super::*;

    #[tokio::test]
    async fn devices_keyed_by_canonical_mac() {
        let raw: ClientDevice = serde_json::from_value(json!({
            "ip": "10.0.0.5",
            "name": "phone",
            "interface": {"name": "eth0"}
        }))
        .unwrap();
        let bridge = bridge(MockClient {
            devices: Some(HashMap::from([("AA:bb:CC:dd:ee:ff".to_string(), raw)])),
            ..MockClient::default()
        });

        let devices = bridge.get_connected_devices().await.unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(
            devices.get("aa:bb:cc:dd:ee:ff"),
            Some(&ConnectedDevice {
                ip: Some("10.0.0.5".to_string()),
                name: Some("phone".to_string()),
                connected_to: Some("eth0".to_string()),
            })
        );
        assert_eq!(*bridge.client().reachable_flags.lock(), vec![true]);
    }

    #[tokio::test]
    async fn mixed_mac_notations_collapse_to_one_form() {
        let bridge = bridge(MockClient {
            devices: Some(HashMap::from([
                ("00-1A-2B-3C-4D-5E".to_string(), ClientDevice::default()),
                ("0011.2233.4455".to_string(), ClientDevice::default()),
                ("A0B1C2D3E4F5".to_string(), ClientDevice::default()),
            ])),
            ..MockClient::default()
        });

        let devices = bridge.get_connected_devices().await.unwrap();
        let mut keys: Vec<_> = devices.keys().cloned().collect();
        keys.sort();

        assert_eq!(
            keys,
            ["00:11:22:33:44:55", "00:1a:2b:3c:4d:5e", "a0:b1:c2:d3:e4:f5"]
        );
        assert!(devices.values().all(|d| *d == ConnectedDevice::default()));
    }

    #[tokio::test]
    async fn absent_or_empty_devices_yield_empty_mapping() {
        let absent = bridge(MockClient::default());
        assert!(absent.get_connected_devices().await.unwrap().is_empty());

        let empty = bridge(MockClient {
            devices: Some(HashMap::new()),
            ..MockClient::default()
        });
        assert!(empty.get_connected_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn device_errors_propagate() {
        let bridge = bridge(MockClient {
            fail_metrics: true,
            ..MockClient::default()
        });
        let err = bridge.get_connected_devices().await.unwrap_err();
        assert!(matches!(err, Error::Client(ClientError::CommandFailed(_))));
    }
}

// ============================================================================
// Sensors
// ============================================================================

mod sensors {
    use super::*;

    #[tokio::test]
    async fn byte_counters_are_renamed() {
        let bridge = bridge(MockClient {
            transfer: BTreeMap::from([("tx".to_string(), 100), ("rx".to_string(), 200)]),
            ..MockClient::default()
        });

        let bytes = bridge.get_byte_counters().await.unwrap();

        assert_eq!(
            bytes,
            BTreeMap::from([
                ("sensor_rx_bytes".to_string(), 200),
                ("sensor_tx_bytes".to_string(), 100),
            ])
        );
    }

    #[tokio::test]
    async fn byte_counters_present_even_when_empty() {
        let bridge = bridge(MockClient::default());
        assert!(bridge.get_byte_counters().await.unwrap().is_empty());

        let readings = bridge.read_sensors(SensorFamily::Bytes).await.unwrap();
        assert_eq!(readings, Some(BTreeMap::new()));
    }

    #[tokio::test]
    async fn rates_renamed_or_none() {
        let with_rates = bridge(MockClient {
            rates: Some(floats(&[("rx", 1250.5), ("tx", 300.0)])),
            ..MockClient::default()
        });
        assert_eq!(
            with_rates.get_rates().await.unwrap(),
            Some(floats(&[("sensor_rx_rates", 1250.5), ("sensor_tx_rates", 300.0)]))
        );

        let absent = bridge(MockClient::default());
        assert_eq!(absent.get_rates().await.unwrap(), None);

        let empty = bridge(MockClient {
            rates: Some(BTreeMap::new()),
            ..MockClient::default()
        });
        assert_eq!(empty.get_rates().await.unwrap(), None);
    }

    #[tokio::test]
    async fn load_averages_and_temperatures_pass_through() {
        let load = floats(&[
            ("sensor_load_avg1", 0.12),
            ("sensor_load_avg5", 0.34),
            ("sensor_load_avg15", 0.56),
        ]);
        let temps = floats(&[("2.4GHz", 44.5), ("5.0GHz", 47.0), ("CPU", 71.0)]);
        let bridge = bridge(MockClient {
            loadavg: Some(load.clone()),
            temperatures: Mutex::new(Some(temps.clone())),
            ..MockClient::default()
        });

        assert_eq!(bridge.get_load_averages().await.unwrap(), Some(load));
        assert_eq!(bridge.get_temperatures().await.unwrap(), Some(temps));
    }

    #[tokio::test]
    async fn missing_load_and_temperatures_are_none() {
        let bridge = bridge(MockClient {
            loadavg: Some(BTreeMap::new()),
            ..MockClient::default()
        });

        assert_eq!(bridge.get_load_averages().await.unwrap(), None);
        assert_eq!(bridge.get_temperatures().await.unwrap(), None);
        assert_eq!(bridge.read_sensors(SensorFamily::LoadAvg).await.unwrap(), None);
        assert_eq!(
            bridge.read_sensors(SensorFamily::Temperatures).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn metric_errors_propagate() {
        let bridge = bridge(MockClient {
            fail_metrics: true,
            ..MockClient::default()
        });

        assert!(bridge.get_byte_counters().await.is_err());
        assert!(bridge.get_rates().await.is_err());
        assert!(bridge.get_load_averages().await.is_err());
        assert!(bridge.get_temperatures().await.is_err());
        assert!(bridge.get_available_sensors().await.is_err());
    }

    #[tokio::test]
    async fn available_sensors_lists_every_family() {
        let bridge = bridge(MockClient {
            temperatures: Mutex::new(Some(floats(&[("CPU", 70.0), ("2.4GHz", 45.0)]))),
            ..MockClient::default()
        });

        let available = bridge.get_available_sensors().await.unwrap();

        assert_eq!(available.len(), 4);
        assert_eq!(
            available[&SensorFamily::Bytes].sensors,
            ["sensor_rx_bytes", "sensor_tx_bytes"]
        );
        assert_eq!(
            available[&SensorFamily::Rates].sensors,
            ["sensor_rx_rates", "sensor_tx_rates"]
        );
        assert_eq!(available[&SensorFamily::LoadAvg].sensors.len(), 3);
        assert_eq!(
            available[&SensorFamily::Temperatures].sensors,
            ["2.4GHz", "CPU"]
        );
    }

    #[tokio::test]
    async fn temperature_sensors_follow_the_router() {
        let bridge = bridge(MockClient::default());
        let before = bridge.get_available_sensors().await.unwrap();
        assert!(before[&SensorFamily::Temperatures].is_empty());

        *bridge.client().temperatures.lock() = Some(floats(&[("CPU", 65.0)]));
        let after = bridge.get_available_sensors().await.unwrap();
        assert_eq!(after[&SensorFamily::Temperatures].sensors, ["CPU"]);
    }

    #[tokio::test]
    async fn read_sensors_dispatches_by_family() {
        let bridge = bridge(MockClient {
            transfer: BTreeMap::from([("rx".to_string(), 42)]),
            rates: Some(floats(&[("tx", 8.0)])),
            ..MockClient::default()
        });

        let bytes = bridge.read_sensors(SensorFamily::Bytes).await.unwrap().unwrap();
        assert_eq!(bytes["sensor_rx_bytes"], SensorValue::Counter(42));

        let rates = bridge.read_sensors(SensorFamily::Rates).await.unwrap().unwrap();
        assert_eq!(rates["sensor_tx_rates"], SensorValue::Gauge(8.0));
    }

    #[tokio::test]
    async fn accessors_run_concurrently() {
        let bridge = bridge(MockClient {
            transfer: BTreeMap::from([("rx".to_string(), 1), ("tx".to_string(), 2)]),
            loadavg: Some(floats(&[("sensor_load_avg1", 1.0)])),
            ..MockClient::default()
        });

        let (bytes, rates, load) = tokio::join!(
            bridge.get_byte_counters(),
            bridge.get_rates(),
            bridge.get_load_averages()
        );

        assert_eq!(bytes.unwrap().len(), 2);
        assert_eq!(rates.unwrap(), None);
        assert!(load.unwrap().is_some());
    }

    #[tokio::test]
    async fn available_sensors_serialize_by_family_key() {
        let bridge = bridge(MockClient::default());
        let available = bridge.get_available_sensors().await.unwrap();

        let json = serde_json::to_value(&available).unwrap();
        assert_eq!(
            json["sensors_rates"]["sensors"],
            json!(["sensor_rx_rates", "sensor_tx_rates"])
        );
        assert_eq!(json["sensors_temperatures"]["family"], json!("sensors_temperatures"));
    }
}
