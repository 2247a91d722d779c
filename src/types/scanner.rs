// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregated scanner record.

use serde::{Deserialize, Serialize};

use super::{MacAddress, ScannerCloud, Serial, WifiInfo};

/// Everything known about one scanner.
///
/// The record is assembled from several sources: BLE discovery provides the
/// address (and an inferred BSSID), the power characteristic provides
/// `powered`, the Wi-Fi characteristic provides `wifi_info`, and the cloud
/// provides `cloud`.
///
/// # Examples
///
/// ```
/// use scanbus::types::{Scanner, Serial};
///
/// let scanner = Scanner::new(Serial::new("CUS-0042").unwrap());
/// assert!(!scanner.powered);
/// assert!(scanner.wifi_info.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scanner {
    /// Scanner serial (also its advertised BLE name).
    pub serial: Serial,
    /// BLE address the scanner was discovered at.
    pub bluetooth_addr: Option<MacAddress>,
    /// Wi-Fi access point address, inferred or reported.
    pub bssid: Option<MacAddress>,
    /// Last reported Wi-Fi configuration.
    pub wifi_info: Option<WifiInfo>,
    /// Whether the scanner reported itself powered.
    pub powered: bool,
    /// Cloud metadata, once received.
    pub cloud: Option<ScannerCloud>,
}

impl Scanner {
    /// Creates an empty record for a serial.
    #[must_use]
    pub fn new(serial: Serial) -> Self {
        Self {
            serial,
            bluetooth_addr: None,
            bssid: None,
            wifi_info: None,
            powered: false,
            cloud: None,
        }
    }

    /// Records reported Wi-Fi info.
    ///
    /// A BSSID carried in the payload replaces the inferred one.
    pub fn apply_wifi_info(&mut self, info: WifiInfo) {
        if let Some(bssid) = info.bssid {
            self.bssid = Some(bssid);
        }
        self.wifi_info = Some(info);
    }

    /// Returns `true` if the scanner can be joined over Wi-Fi.
    #[must_use]
    pub fn can_join_wifi(&self) -> bool {
        self.wifi_info.as_ref().is_some_and(WifiInfo::has_credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> Scanner {
        Scanner::new(Serial::new("CUS-0042").unwrap())
    }

    #[test]
    fn reported_bssid_overrides_inferred() {
        let mut scanner = scanner();
        scanner.bssid = Some(MacAddress::new([1, 2, 3, 4, 5, 6]));

        let reported = MacAddress::new([9, 9, 9, 9, 9, 9]);
        scanner.apply_wifi_info(WifiInfo {
            bssid: Some(reported),
            ..WifiInfo::default()
        });

        assert_eq!(scanner.bssid, Some(reported));
    }

    #[test]
    fn wifi_info_without_bssid_keeps_inferred() {
        let mut scanner = scanner();
        let inferred = MacAddress::new([1, 2, 3, 4, 5, 6]);
        scanner.bssid = Some(inferred);

        scanner.apply_wifi_info(WifiInfo::from_payload("ssid: lab\npw: secret\n"));

        assert_eq!(scanner.bssid, Some(inferred));
        assert!(scanner.can_join_wifi());
    }
}
