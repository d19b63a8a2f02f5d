// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Router identity metadata read from nvram.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::format_mac;

/// Identity of the router, for device-registry metadata.
///
/// Each field is filled independently; a field stays `None` when the router
/// does not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouterIdentity {
    /// Firmware version, e.g. `3.0.0.4 (build 388_24198)`.
    pub firmware: Option<String>,
    /// Product model, e.g. `RT-AX88U`.
    pub model: Option<String>,
    /// Canonical MAC address printed on the device label.
    pub label_mac: Option<String>,
}

impl RouterIdentity {
    /// Returns `true` once every field is known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.firmware.is_some() && self.model.is_some() && self.label_mac.is_some()
    }
}

pub(crate) fn parse_label_mac(nvram: &HashMap<String, String>) -> Option<String> {
    nvram.get("label_mac").map(|mac| format_mac(mac))
}

pub(crate) fn parse_firmware(nvram: &HashMap<String, String>) -> Option<String> {
    let version = nvram.get("firmver")?;
    Some(match nvram.get("buildno") {
        Some(build) => format!("{version} (build {build})"),
        None => version.clone(),
    })
}

pub(crate) fn parse_model(nvram: &HashMap<String, String>) -> Option<String> {
    nvram.get("model").cloned()
}
