// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration and options records supplied by the host platform.
//!
//! A config entry describes how to reach the router and is fixed for the
//! bridge's lifetime. Options are user-tunable feature toggles; every key
//! has a default.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{OperatingMode, Protocol};

/// Connection settings for one router.
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::config::BridgeConfig;
/// use asuswrt_bridge::types::{OperatingMode, Protocol};
///
/// let config = BridgeConfig::new("192.168.1.1", "admin")
///     .with_password("secret")
///     .with_protocol(Protocol::Telnet)
///     .with_port(2323);
///
/// assert_eq!(config.mode, OperatingMode::Router);
/// assert_eq!(config.port, Some(2323));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeConfig {
    /// Hostname or IP address of the router.
    pub host: String,
    /// Login name on the router.
    pub username: String,
    /// Login password, if password authentication is used.
    #[serde(default)]
    pub password: Option<String>,
    /// Path to a private key, if key authentication is used.
    #[serde(default)]
    pub ssh_key: Option<String>,
    /// Port override. `None` lets the client pick the protocol default.
    #[serde(default)]
    pub port: Option<u16>,
    /// Session protocol.
    #[serde(default)]
    pub protocol: Protocol,
    /// Operating mode of the router.
    #[serde(default)]
    pub mode: OperatingMode,
}

impl BridgeConfig {
    /// Creates an SSH router configuration with no credentials besides the
    /// username.
    #[must_use]
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: None,
            ssh_key: None,
            port: None,
            protocol: Protocol::default(),
            mode: OperatingMode::default(),
        }
    }

    /// Parses a config-entry record.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the record has the wrong shape, and
    /// `ConfigError::MissingField` if the host is empty. An unrecognized
    /// protocol selects SSH and an unrecognized mode selects access point.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value)?;
        if config.host.trim().is_empty() {
            return Err(ConfigError::MissingField("host"));
        }
        Ok(config)
    }

    /// Sets the login password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the private key path.
    #[must_use]
    pub fn with_ssh_key(mut self, path: impl Into<String>) -> Self {
        self.ssh_key = Some(path.into());
        self
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the session protocol.
    #[must_use]
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Sets the operating mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Feature toggles for a router.
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::config::BridgeOptions;
///
/// let options = BridgeOptions::default().with_interface("ppp0");
/// assert!(options.require_ip);
/// assert_eq!(options.interface, "ppp0");
/// assert_eq!(options.dnsmasq, BridgeOptions::DEFAULT_DNSMASQ);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeOptions {
    /// Only report devices that hold an IP address as connected.
    pub require_ip: bool,
    /// WAN interface whose counters feed the traffic sensors.
    pub interface: String,
    /// Directory holding the dnsmasq lease cache used for hostnames.
    pub dnsmasq: String,
}

impl BridgeOptions {
    /// Default WAN interface.
    pub const DEFAULT_INTERFACE: &'static str = "eth0";
    /// Default dnsmasq lease directory.
    pub const DEFAULT_DNSMASQ: &'static str = "/var/lib/misc";

    /// Parses an options record. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a key holds a value of the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(Into::into)
    }

    /// Sets whether devices need an IP address to count as connected.
    #[must_use]
    pub fn with_require_ip(mut self, require_ip: bool) -> Self {
        self.require_ip = require_ip;
        self
    }

    /// Sets the WAN interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    /// Sets the dnsmasq lease directory.
    #[must_use]
    pub fn with_dnsmasq(mut self, dnsmasq: impl Into<String>) -> Self {
        self.dnsmasq = dnsmasq.into();
        self
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            require_ip: true,
            interface: Self::DEFAULT_INTERFACE.to_string(),
            dnsmasq: Self::DEFAULT_DNSMASQ.to_string(),
        }
    }
}
