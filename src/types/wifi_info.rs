// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wi-Fi configuration reported by a scanner.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::MacAddress;

/// Wi-Fi network configuration published by a scanner.
///
/// Scanners publish this over BLE as newline-separated `key: value` lines.
/// Every field is optional because scanners omit keys that do not apply
/// to their current state (for example no address while disconnected).
///
/// # Examples
///
/// ```
/// use scanbus::types::WifiInfo;
///
/// let info = WifiInfo::from_payload("state: connected\nssid: DIRECT-scanner\nctl: 5828\n");
/// assert_eq!(info.state.as_deref(), Some("connected"));
/// assert_eq!(info.ssid.as_deref(), Some("DIRECT-scanner"));
/// assert_eq!(info.control_port, Some(5828));
/// assert_eq!(info.cast_port, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiInfo {
    /// Connection state as reported by the scanner.
    pub state: Option<String>,
    /// Network name.
    pub ssid: Option<String>,
    /// Access point hardware address.
    pub bssid: Option<MacAddress>,
    /// WPA2 passphrase.
    pub passphrase: Option<String>,
    /// IPv4 address of the scanner on this network.
    pub ip_addr: Option<Ipv4Addr>,
    /// TCP port for the control connection.
    pub control_port: Option<u16>,
    /// TCP port for the cast (imaging) connection.
    pub cast_port: Option<u16>,
}

impl WifiInfo {
    /// Decodes the `key: value` text payload.
    ///
    /// Unknown keys, lines without a `:` separator, empty values and values
    /// that fail to parse are ignored rather than rejected, so a partially
    /// valid payload still yields whatever it could read.
    #[must_use]
    pub fn from_payload(payload: &str) -> Self {
        let mut info = Self::default();

        for line in payload.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.trim() {
                "state" => info.state = Some(value.to_string()),
                "ssid" => info.ssid = Some(value.to_string()),
                "pw" => info.passphrase = Some(value.to_string()),
                "bssid" => info.bssid = value.parse().ok(),
                "ip4" => info.ip_addr = value.parse().ok(),
                "ctl" => info.control_port = value.parse().ok(),
                "cast" => info.cast_port = value.parse().ok(),
                other => {
                    tracing::trace!(key = other, "Ignoring unknown Wi-Fi payload key");
                }
            }
        }

        info
    }

    /// Returns `true` if the info carries enough to join the network.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.ssid.is_some() && self.passphrase.is_some()
    }
}

fn field<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

impl fmt::Display for WifiInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "state: {}", field(self.state.as_ref()))?;
        writeln!(f, "ssid: {}", field(self.ssid.as_ref()))?;
        writeln!(f, "bssid: {}", field(self.bssid.as_ref()))?;
        // Never echo the passphrase itself.
        let passphrase = if self.passphrase.is_some() { "<set>" } else { "-" };
        writeln!(f, "passphrase: {passphrase}")?;
        writeln!(f, "ipAddr: {}", field(self.ip_addr.as_ref()))?;
        writeln!(f, "controlPort: {}", field(self.control_port.as_ref()))?;
        write!(f, "castPort: {}", field(self.cast_port.as_ref()))
    }
}
