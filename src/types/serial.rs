// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scanner serial identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Identifier of a scanner.
///
/// Scanners advertise their serial as their BLE device name (for example
/// `CUS-2113A0B1`), and the same string keys cloud records. A serial is
/// never empty; surrounding whitespace is stripped at construction.
///
/// # Examples
///
/// ```
/// use scanbus::types::Serial;
///
/// let serial = Serial::new(" CUS-0042 ").unwrap();
/// assert_eq!(serial.as_str(), "CUS-0042");
///
/// assert!(Serial::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Serial(String);

impl Serial {
    /// Creates a serial from a string.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidSerial` if the string is empty after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueError> {
        let raw = value.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueError::InvalidSerial(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the serial as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Serial {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Serial {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Serial> for String {
    fn from(serial: Serial) -> Self {
        serial.0
    }
}

impl AsRef<str> for Serial {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
