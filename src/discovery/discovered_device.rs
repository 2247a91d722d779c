// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BLE discovery record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::MacAddress;

/// A device seen during a BLE scan.
///
/// Any advertising device produces one of these; whether it is a scanner is
/// decided later from its name (see [`DiscoveryConfig`](super::DiscoveryConfig)).
///
/// # Examples
///
/// ```
/// use scanbus::discovery::DiscoveredDevice;
/// use scanbus::types::MacAddress;
///
/// let device = DiscoveredDevice::new(MacAddress::new([0xA4, 0xC1, 0x38, 0, 0, 0x10]))
///     .with_name("CUS-0042");
///
/// assert_eq!(device.display_name(), "CUS-0042");
/// assert_eq!(
///     device.inferred_bssid(),
///     Some(MacAddress::new([0xA4, 0xC1, 0x38, 0, 0, 0x11]))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    /// BLE address.
    pub address: MacAddress,
    /// Advertised device name.
    pub name: Option<String>,
    /// User-assigned alias, if the platform reports one.
    pub alias: Option<String>,
}

impl DiscoveredDevice {
    /// Creates a record for an address with no name or alias.
    #[must_use]
    pub fn new(address: MacAddress) -> Self {
        Self {
            address,
            name: None,
            alias: None,
        }
    }

    /// Sets the advertised name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns `true` if the device has neither a name nor an alias.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.name.is_none() && self.alias.is_none()
    }

    /// Returns the best human-readable label: name, then alias, then address.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.alias.clone())
            .unwrap_or_else(|| self.address.to_string())
    }

    /// Infers the Wi-Fi BSSID of a scanner from its BLE address.
    ///
    /// Scanners expose their access point at the BLE address plus one in the
    /// last octet. No BSSID can be inferred when that octet is `0xFF`.
    #[must_use]
    pub fn inferred_bssid(&self) -> Option<MacAddress> {
        self.address.next_in_last_octet()
    }
}

impl fmt::Display for DiscoveredDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
