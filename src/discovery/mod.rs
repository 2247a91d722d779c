// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BLE discovery of scanners.
//!
//! Discovery itself is performed by the platform BLE stack; this module
//! covers what happens to its output:
//!
//! - [`DiscoveredDevice`] - The record published with `device-found`
//! - [`DiscoveryConfig`] - How scanners are told apart from other devices
//! - [`gatt`] - Scanner GATT layout and characteristic decoding
//! - [`CommandQueue`] - One-at-a-time execution of GATT operations
//!
//! # Examples
//!
//! ```
//! use scanbus::discovery::{DiscoveredDevice, DiscoveryConfig};
//! use scanbus::types::MacAddress;
//!
//! let config = DiscoveryConfig::default();
//! let device = DiscoveredDevice::new(MacAddress::new([0, 1, 2, 3, 4, 5])).with_name("CUS-0042");
//!
//! let serial = config.scanner_serial(&device).unwrap();
//! assert_eq!(serial.as_str(), "CUS-0042");
//! ```

mod discovered_device;
pub mod gatt;
mod operator;

pub use discovered_device::DiscoveredDevice;
pub use operator::CommandQueue;

use crate::types::Serial;

/// Configuration for recognizing scanners among discovered BLE devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    scanner_name_prefix: String,
}

impl DiscoveryConfig {
    /// Name prefix advertised by scanners.
    pub const DEFAULT_SCANNER_NAME_PREFIX: &'static str = "CUS-";

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scanner_name_prefix: Self::DEFAULT_SCANNER_NAME_PREFIX.to_string(),
        }
    }

    /// Sets the advertised name prefix that identifies a scanner.
    #[must_use]
    pub fn with_scanner_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scanner_name_prefix = prefix.into();
        self
    }

    /// Returns the scanner name prefix.
    #[must_use]
    pub fn scanner_name_prefix(&self) -> &str {
        &self.scanner_name_prefix
    }

    /// Returns `true` if the device advertises itself as a scanner.
    ///
    /// Only the advertised name counts; aliases are user-assigned.
    #[must_use]
    pub fn is_scanner(&self, device: &DiscoveredDevice) -> bool {
        device
            .name
            .as_deref()
            .is_some_and(|name| name.starts_with(&self.scanner_name_prefix))
    }

    /// Returns the serial of a discovered scanner, or `None` for any other
    /// device.
    #[must_use]
    pub fn scanner_serial(&self, device: &DiscoveredDevice) -> Option<Serial> {
        if !self.is_scanner(device) {
            return None;
        }
        device.name.as_deref().and_then(|name| Serial::new(name).ok())
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MacAddress;

    fn device() -> DiscoveredDevice {
        DiscoveredDevice::new(MacAddress::new([0, 1, 2, 3, 4, 5]))
    }

    #[test]
    fn default_prefix_matches_scanners() {
        let config = DiscoveryConfig::default();

        assert!(config.is_scanner(&device().with_name("CUS-1234")));
        assert!(!config.is_scanner(&device().with_name("Headphones")));
        assert!(!config.is_scanner(&device().with_alias("CUS-1234")));
        assert!(!config.is_scanner(&device()));
    }

    #[test]
    fn custom_prefix() {
        let config = DiscoveryConfig::new().with_scanner_name_prefix("LAB-");

        assert_eq!(config.scanner_name_prefix(), "LAB-");
        assert!(config.is_scanner(&device().with_name("LAB-9")));
        assert!(!config.is_scanner(&device().with_name("CUS-9")));
    }

    #[test]
    fn scanner_serial_uses_advertised_name() {
        let config = DiscoveryConfig::default();

        assert_eq!(
            config.scanner_serial(&device().with_name("CUS-77")),
            Some(Serial::new("CUS-77").unwrap())
        );
        assert_eq!(config.scanner_serial(&device().with_name("other")), None);
    }
}
