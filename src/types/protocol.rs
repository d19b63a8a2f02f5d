// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection protocol and operating mode selected in a config entry.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Remote shell protocol used to reach the router.
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::types::Protocol;
///
/// assert_eq!("ssh".parse::<Protocol>().unwrap(), Protocol::Ssh);
/// assert_eq!(Protocol::Telnet.as_str(), "telnet");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Protocol {
    /// Secure shell.
    #[default]
    Ssh,
    /// Legacy telnet session.
    Telnet,
}

impl Protocol {
    /// Returns the config-entry value for this protocol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ssh => "ssh",
            Self::Telnet => "telnet",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ssh" => Ok(Self::Ssh),
            "telnet" => Ok(Self::Telnet),
            _ => Err(ConfigError::InvalidProtocol(s.to_string())),
        }
    }
}

/// Config entries only distinguish telnet; any other value selects SSH.
impl From<String> for Protocol {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(Self::Telnet.as_str()) {
            Self::Telnet
        } else {
            Self::Ssh
        }
    }
}

/// Role the router plays on the network.
///
/// Access points do not run DHCP, so device discovery relies on ARP and
/// wireless association tables instead of leases.
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::types::OperatingMode;
///
/// assert_eq!("ap".parse::<OperatingMode>().unwrap(), OperatingMode::AccessPoint);
/// assert_eq!(OperatingMode::Router.to_string(), "router");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum OperatingMode {
    /// Gateway router.
    #[default]
    Router,
    /// Access point behind another router.
    AccessPoint,
}

impl OperatingMode {
    /// Returns the config-entry value for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::AccessPoint => "ap",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "router" => Ok(Self::Router),
            "ap" | "access_point" => Ok(Self::AccessPoint),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

/// Config entries only distinguish router; any other value selects AP.
impl From<String> for OperatingMode {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(Self::Router.as_str()) {
            Self::Router
        } else {
            Self::AccessPoint
        }
    }
}
