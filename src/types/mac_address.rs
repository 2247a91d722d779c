// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 48-bit hardware address used for BLE addresses and Wi-Fi BSSIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A 48-bit MAC address.
///
/// Parsed from six hex octets separated by `:` or `-`, displayed as
/// upper-case colon-separated octets.
///
/// # Examples
///
/// ```
/// use scanbus::types::MacAddress;
///
/// let addr: MacAddress = "a4:c1:38:0f:22:7e".parse().unwrap();
/// assert_eq!(addr.to_string(), "A4:C1:38:0F:22:7E");
/// assert_eq!(addr.octets()[5], 0x7E);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Creates an address from raw octets.
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the raw octets.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Returns the address with its last octet incremented by one.
    ///
    /// Returns `None` when the last octet is `0xFF`; the increment does not
    /// carry into the preceding octet.
    #[must_use]
    pub fn next_in_last_octet(&self) -> Option<Self> {
        let mut octets = self.0;
        octets[5] = octets[5].checked_add(1)?;
        Some(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl FromStr for MacAddress {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::InvalidMacAddress(s.to_string());

        let mut octets = [0u8; 6];
        let mut parts = s.trim().split([':', '-']);
        for octet in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(addr: MacAddress) -> Self {
        addr.to_string()
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_colon_and_dash() {
        let colon: MacAddress = "00:11:22:33:44:55".parse().unwrap();
        let dash: MacAddress = "00-11-22-33-44-55".parse().unwrap();
        assert_eq!(colon, dash);
        assert_eq!(colon.octets(), [0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "00:11:22:33:44", "00:11:22:33:44:55:66", "0:11:22:33:44:55", "zz:11:22:33:44:55"] {
            assert!(
                matches!(bad.parse::<MacAddress>(), Err(ValueError::InvalidMacAddress(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn display_is_uppercase() {
        let addr = MacAddress::new([0xab, 0xcd, 0xef, 0x01, 0x02, 0x03]);
        assert_eq!(addr.to_string(), "AB:CD:EF:01:02:03");
    }

    #[test]
    fn next_in_last_octet() {
        let addr = MacAddress::new([0, 0, 0, 0, 0x12, 0x34]);
        assert_eq!(
            addr.next_in_last_octet(),
            Some(MacAddress::new([0, 0, 0, 0, 0x12, 0x35]))
        );
    }

    #[test]
    fn next_in_last_octet_does_not_wrap() {
        let addr = MacAddress::new([0, 0, 0, 0, 0x12, 0xFF]);
        assert_eq!(addr.next_in_last_octet(), None);
    }
}
