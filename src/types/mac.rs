// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MAC address normalization.

/// Normalizes a MAC address to lowercase, colon-separated form.
///
/// Accepts the colon (`AA:BB:CC:DD:EE:FF`), dash (`AA-BB-CC-DD-EE-FF`),
/// dotted (`aabb.ccdd.eeff`) and bare (`aabbccddeeff`) notations in any case.
/// Anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use asuswrt_bridge::types::format_mac;
///
/// assert_eq!(format_mac("AA:bb:CC:dd:ee:FF"), "aa:bb:cc:dd:ee:ff");
/// assert_eq!(format_mac("AA-BB-CC-DD-EE-FF"), "aa:bb:cc:dd:ee:ff");
/// assert_eq!(format_mac("aabb.ccdd.eeff"), "aa:bb:cc:dd:ee:ff");
/// assert_eq!(format_mac("AABBCCDDEEFF"), "aa:bb:cc:dd:ee:ff");
/// assert_eq!(format_mac("not-a-mac"), "not-a-mac");
/// ```
#[must_use]
pub fn format_mac(mac: &str) -> String {
    let len = mac.chars().count();
    if len == 17 && count(mac, ':') == 5 {
        return mac.to_lowercase();
    }

    let bare = if len == 17 && count(mac, '-') == 5 {
        mac.replace('-', "")
    } else if len == 14 && count(mac, '.') == 2 {
        mac.replace('.', "")
    } else {
        mac.to_string()
    };

    if bare.chars().count() == 12 {
        let lower: Vec<char> = bare.to_lowercase().chars().take(12).collect();
        return lower
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(":");
    }

    mac.to_string()
}

fn count(s: &str, sep: char) -> usize {
    s.chars().filter(|&c| c == sep).count()
}
