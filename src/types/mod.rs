// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by configuration and bridge records.
//!
//! # Types
//!
//! - [`Protocol`] - SSH or Telnet session to the router
//! - [`OperatingMode`] - Router or access point
//! - [`format_mac`] - Canonical MAC address normalization

mod mac;
mod protocol;

pub use mac::format_mac;
pub use protocol::{OperatingMode, Protocol};
