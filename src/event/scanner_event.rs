// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveredDevice;
use crate::error::{ParseError, ValueError};
use crate::types::{Scanner, ScannerCloud, Serial, WifiInfo};

/// Notifications broadcast on the [`NotificationBus`](super::NotificationBus).
///
/// Each variant is one named notification with a fixed payload. Matching on
/// the variant gives typed access to the payload, so no notification can be
/// published or received with the wrong shape.
///
/// The JSON form is internally tagged with the notification name:
///
/// ```
/// use scanbus::event::ScannerEvent;
/// use scanbus::types::Serial;
///
/// let event = ScannerEvent::power_changed(Serial::new("ABC123").unwrap(), true);
/// assert_eq!(
///     event.to_json().unwrap(),
///     r#"{"event":"power-state-changed","serial":"ABC123","powered":true}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ScannerEvent {
    /// The active scanner selection changed.
    ScannerSelectionChanged {
        /// Serial of the newly selected scanner.
        serial: Serial,
    },

    /// A device was discovered over BLE.
    DeviceFound {
        /// The discovery record.
        device: DiscoveredDevice,
    },

    /// A scanner's power state changed.
    PowerStateChanged {
        /// Serial of the scanner.
        serial: Serial,
        /// Whether the scanner is now powered.
        powered: bool,
    },

    /// A scanner reported its Wi-Fi configuration.
    WifiInfoReceived {
        /// Serial of the scanner.
        serial: Serial,
        /// The reported configuration.
        wifi_info: WifiInfo,
    },

    /// Cloud metadata for a scanner arrived.
    CloudRecordReceived {
        /// The cloud record.
        scanner_cloud: ScannerCloud,
    },

    /// Scanner details should be (re)populated.
    DeviceDetailsRequested {
        /// The scanner whose details to show.
        scanner: Scanner,
    },
}

impl ScannerEvent {
    /// Returns the kind of this notification.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ScannerSelectionChanged { .. } => EventKind::ScannerSelectionChanged,
            Self::DeviceFound { .. } => EventKind::DeviceFound,
            Self::PowerStateChanged { .. } => EventKind::PowerStateChanged,
            Self::WifiInfoReceived { .. } => EventKind::WifiInfoReceived,
            Self::CloudRecordReceived { .. } => EventKind::CloudRecordReceived,
            Self::DeviceDetailsRequested { .. } => EventKind::DeviceDetailsRequested,
        }
    }

    /// Returns the notification name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the serial of the scanner this notification concerns.
    ///
    /// Discovery notifications carry no serial: the device may not be a
    /// scanner at all.
    #[must_use]
    pub fn serial(&self) -> Option<&Serial> {
        match self {
            Self::ScannerSelectionChanged { serial }
            | Self::PowerStateChanged { serial, .. }
            | Self::WifiInfoReceived { serial, .. } => Some(serial),
            Self::CloudRecordReceived { scanner_cloud } => Some(&scanner_cloud.serial),
            Self::DeviceDetailsRequested { scanner } => Some(&scanner.serial),
            Self::DeviceFound { .. } => None,
        }
    }

    /// Creates a selection changed notification.
    #[must_use]
    pub fn selection_changed(serial: Serial) -> Self {
        Self::ScannerSelectionChanged { serial }
    }

    /// Creates a device found notification.
    #[must_use]
    pub fn device_found(device: DiscoveredDevice) -> Self {
        Self::DeviceFound { device }
    }

    /// Creates a power state changed notification.
    #[must_use]
    pub fn power_changed(serial: Serial, powered: bool) -> Self {
        Self::PowerStateChanged { serial, powered }
    }

    /// Creates a Wi-Fi info received notification.
    #[must_use]
    pub fn wifi_info_received(serial: Serial, wifi_info: WifiInfo) -> Self {
        Self::WifiInfoReceived { serial, wifi_info }
    }

    /// Creates a cloud record received notification.
    #[must_use]
    pub fn cloud_record_received(scanner_cloud: ScannerCloud) -> Self {
        Self::CloudRecordReceived { scanner_cloud }
    }

    /// Creates a details requested notification.
    #[must_use]
    pub fn details_requested(scanner: Scanner) -> Self {
        Self::DeviceDetailsRequested { scanner }
    }

    /// Serializes the notification to its tagged JSON form.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a notification from its tagged JSON form.
    ///
    /// An unknown name or a payload that does not match the shape declared
    /// for the name is rejected.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the input is not a valid notification.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Discriminant of a [`ScannerEvent`], used to pick which notifications a
/// handler receives.
///
/// # Examples
///
/// ```
/// use scanbus::event::EventKind;
///
/// let kind: EventKind = "wifi-info-received".parse().unwrap();
/// assert_eq!(kind, EventKind::WifiInfoReceived);
/// assert_eq!(kind.to_string(), "wifi-info-received");
///
/// assert!("wifiInfo".parse::<EventKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// See [`ScannerEvent::ScannerSelectionChanged`].
    ScannerSelectionChanged,
    /// See [`ScannerEvent::DeviceFound`].
    DeviceFound,
    /// See [`ScannerEvent::PowerStateChanged`].
    PowerStateChanged,
    /// See [`ScannerEvent::WifiInfoReceived`].
    WifiInfoReceived,
    /// See [`ScannerEvent::CloudRecordReceived`].
    CloudRecordReceived,
    /// See [`ScannerEvent::DeviceDetailsRequested`].
    DeviceDetailsRequested,
}

impl EventKind {
    /// Every notification kind.
    pub const ALL: [Self; 6] = [
        Self::ScannerSelectionChanged,
        Self::DeviceFound,
        Self::PowerStateChanged,
        Self::WifiInfoReceived,
        Self::CloudRecordReceived,
        Self::DeviceDetailsRequested,
    ];

    /// Returns the notification name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScannerSelectionChanged => "scanner-selection-changed",
            Self::DeviceFound => "device-found",
            Self::PowerStateChanged => "power-state-changed",
            Self::WifiInfoReceived => "wifi-info-received",
            Self::CloudRecordReceived => "cloud-record-received",
            Self::DeviceDetailsRequested => "device-details-requested",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ValueError::UnknownEvent(s.to_string()))
    }
}
