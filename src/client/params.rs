// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection parameters handed to a client library.

use crate::config::{BridgeConfig, BridgeOptions};
use crate::types::{OperatingMode, Protocol};

/// Transport used by the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    /// SSH session.
    Ssh,
    /// Telnet session.
    Telnet,
}

impl From<Protocol> for ConnectionType {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Telnet => Self::Telnet,
            Protocol::Ssh => Self::Ssh,
        }
    }
}

/// Router role as understood by the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Gateway router; devices are read from DHCP leases.
    Router,
    /// Access point; devices are read from ARP and association tables.
    Ap,
}

impl From<OperatingMode> for Mode {
    fn from(mode: OperatingMode) -> Self {
        match mode {
            OperatingMode::Router => Self::Router,
            OperatingMode::AccessPoint => Self::Ap,
        }
    }
}

/// Authentication settings.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Login name.
    pub username: String,
    /// Login password.
    pub password: Option<String>,
    /// Transport to use.
    pub connection_type: ConnectionType,
    /// Private key path for SSH.
    pub ssh_key: Option<String>,
    /// Port override; `None` selects the transport default.
    pub port: Option<u16>,
    /// Passphrase protecting the private key.
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("connection_type", &self.connection_type)
            .field("ssh_key", &self.ssh_key)
            .field("port", &self.port)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Router role.
    pub mode: Mode,
    /// Only report devices holding an IP address.
    pub require_ip: bool,
    /// WAN interface for traffic counters.
    pub wan_interface: String,
    /// dnsmasq lease directory.
    pub dnsmasq: String,
}

/// Everything a client library needs to reach one router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Hostname or IP address.
    pub host: String,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Behaviour settings.
    pub settings: Settings,
}

impl ConnectionParams {
    /// Translates a config entry and its options. Absent options take their
    /// defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use asuswrt_bridge::client::{ConnectionParams, ConnectionType, Mode};
    /// use asuswrt_bridge::config::BridgeConfig;
    /// use asuswrt_bridge::types::Protocol;
    ///
    /// let config = BridgeConfig::new("192.168.1.1", "admin").with_protocol(Protocol::Telnet);
    /// let params = ConnectionParams::from_config(&config, None);
    ///
    /// assert_eq!(params.auth.connection_type, ConnectionType::Telnet);
    /// assert_eq!(params.settings.mode, Mode::Router);
    /// assert!(params.settings.require_ip);
    /// ```
    #[must_use]
    pub fn from_config(config: &BridgeConfig, options: Option<&BridgeOptions>) -> Self {
        let defaults = BridgeOptions::default();
        let options = options.unwrap_or(&defaults);

        Self {
            host: config.host.clone(),
            auth: AuthConfig {
                username: config.username.clone(),
                password: config.password.clone(),
                connection_type: config.protocol.into(),
                ssh_key: config.ssh_key.clone(),
                port: config.port.filter(|&port| port != 0),
                passphrase: None,
            },
            settings: Settings {
                mode: config.mode.into(),
                require_ip: options.require_ip,
                wan_interface: options.interface.clone(),
                dnsmasq: options.dnsmasq.clone(),
            },
        }
    }
}
