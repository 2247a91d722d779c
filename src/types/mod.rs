// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types carried by notifications.
//!
//! # Types
//!
//! - [`Serial`] - Non-empty scanner identifier
//! - [`MacAddress`] - BLE address or Wi-Fi BSSID
//! - [`WifiInfo`] - Wi-Fi configuration reported by a scanner
//! - [`ScannerCloud`] - Cloud metadata for a scanner
//! - [`Scanner`] - Aggregated record of everything known about a scanner

mod mac_address;
mod scanner;
mod scanner_cloud;
mod serial;
mod wifi_info;

pub use mac_address::MacAddress;
pub use scanner::Scanner;
pub use scanner_cloud::ScannerCloud;
pub use serial::Serial;
pub use wifi_info::WifiInfo;
