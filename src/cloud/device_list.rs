// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of the cloud device list.

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::{ScannerCloud, Serial};

#[derive(Debug, Deserialize)]
struct DeviceList {
    results: Option<Vec<DeviceEntry>>,
}

#[derive(Debug, Deserialize)]
struct DeviceEntry {
    device: Option<DeviceInfo>,
    crt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeviceInfo {
    serial: Option<String>,
}

/// Parses the device list returned by the cloud service.
///
/// The payload is an object with a `results` array; each entry names its
/// scanner under `device.serial` and may carry a certificate under `crt`.
/// Entries without a usable serial are skipped.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON and
/// `ParseError::MissingField` if `results` is absent.
///
/// # Examples
///
/// ```
/// use scanbus::cloud::parse_device_list;
///
/// let records = parse_device_list(r#"{
///     "results": [
///         {"device": {"serial": "CUS-1"}, "crt": "-----BEGIN CERTIFICATE-----"},
///         {"device": {"serial": "CUS-2"}}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert!(records[0].is_authenticated());
/// assert!(!records[1].is_authenticated());
/// ```
pub fn parse_device_list(json: &str) -> Result<Vec<ScannerCloud>, ParseError> {
    let list: DeviceList = serde_json::from_str(json)?;
    let entries = list
        .results
        .ok_or_else(|| ParseError::MissingField("results".to_string()))?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let raw_serial = entry.device.and_then(|device| device.serial);
        let Some(serial) = raw_serial.as_deref().and_then(|s| Serial::new(s).ok()) else {
            tracing::warn!(index, "Skipping cloud device entry without a serial");
            continue;
        };
        records.push(ScannerCloud {
            serial,
            certificate: entry.crt,
        });
    }

    tracing::debug!(count = records.len(), "Parsed cloud device list");
    Ok(records)
}
