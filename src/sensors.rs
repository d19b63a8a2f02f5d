// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor families and their declared sensors.
//!
//! Each [`SensorFamily`] groups metrics fetched by one router request. The
//! bridge reports which sensors a family offers through a
//! [`SensorDescriptor`] and reads live values with
//! [`RouterBridge::read_sensors`](crate::RouterBridge::read_sensors).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Cumulative byte counter sensors.
pub const SENSORS_BYTES: [&str; 2] = ["sensor_rx_bytes", "sensor_tx_bytes"];

/// Load average sensors.
pub const SENSORS_LOAD_AVG: [&str; 3] =
    ["sensor_load_avg1", "sensor_load_avg5", "sensor_load_avg15"];

/// Transfer rate sensors.
pub const SENSORS_RATES: [&str; 2] = ["sensor_rx_rates", "sensor_tx_rates"];

/// A group of related router metrics.
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::SensorFamily;
///
/// assert_eq!(SensorFamily::Rates.key(), "sensors_rates");
/// assert_eq!(SensorFamily::ALL.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SensorFamily {
    /// Cumulative WAN transfer.
    Bytes,
    /// CPU load averages.
    LoadAvg,
    /// Instantaneous WAN transfer rates.
    Rates,
    /// Radio and CPU temperatures.
    Temperatures,
}

impl SensorFamily {
    /// Every family, in reporting order.
    pub const ALL: [Self; 4] = [Self::Bytes, Self::LoadAvg, Self::Rates, Self::Temperatures];

    /// Returns the stable key of this family.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Bytes => "sensors_bytes",
            Self::LoadAvg => "sensors_load_avg",
            Self::Rates => "sensors_rates",
            Self::Temperatures => "sensors_temperatures",
        }
    }

    /// Sensors declared up front for this family.
    ///
    /// Temperatures are discovered from the router, so this is empty for
    /// [`SensorFamily::Temperatures`].
    #[must_use]
    pub const fn static_sensors(&self) -> &'static [&'static str] {
        match self {
            Self::Bytes => &SENSORS_BYTES,
            Self::LoadAvg => &SENSORS_LOAD_AVG,
            Self::Rates => &SENSORS_RATES,
            Self::Temperatures => &[],
        }
    }
}

impl fmt::Display for SensorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for SensorFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Sensors currently offered by one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorDescriptor {
    /// The family these sensors belong to.
    pub family: SensorFamily,
    /// Sensor keys as they appear in the family's readings.
    pub sensors: Vec<String>,
}

impl SensorDescriptor {
    /// Creates a descriptor carrying the family's declared sensors.
    #[must_use]
    pub fn declared(family: SensorFamily) -> Self {
        Self {
            family,
            sensors: family
                .static_sensors()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Creates a descriptor from sensor names reported by the router.
    #[must_use]
    pub fn discovered(family: SensorFamily, sensors: impl IntoIterator<Item = String>) -> Self {
        Self {
            family,
            sensors: sensors.into_iter().collect(),
        }
    }

    /// Returns `true` if the family currently offers no sensors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

/// A single sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    /// Monotonic counter, e.g. bytes transferred.
    Counter(u64),
    /// Sampled measurement, e.g. a rate or temperature.
    Gauge(f64),
}

impl SensorValue {
    /// Returns the reading as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Counter(value) => value as f64,
            Self::Gauge(value) => value,
        }
    }
}

/// Readings of one family keyed by sensor name.
pub type SensorReadings = BTreeMap<String, SensorValue>;
