// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud-side metadata for a scanner.

use serde::{Deserialize, Serialize};

use super::Serial;

/// Metadata the cloud service holds for one scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerCloud {
    /// Serial of the scanner this record describes.
    pub serial: Serial,
    /// PEM certificate issued for the scanner, if any.
    pub certificate: Option<String>,
}

impl ScannerCloud {
    /// Creates a record without a certificate.
    #[must_use]
    pub fn new(serial: Serial) -> Self {
        Self {
            serial,
            certificate: None,
        }
    }

    /// Sets the certificate.
    #[must_use]
    pub fn with_certificate(mut self, certificate: impl Into<String>) -> Self {
        self.certificate = Some(certificate.into());
        self
    }

    /// Returns `true` if the cloud issued a certificate for this scanner.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.certificate.as_deref().is_some_and(|crt| !crt.is_empty())
    }
}
