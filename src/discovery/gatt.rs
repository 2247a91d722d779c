// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GATT services and characteristics exposed by scanners.
//!
//! Scanners publish two characteristics over BLE: one carrying the power
//! state and one carrying the Wi-Fi configuration. Both are read once after
//! connecting and then delivered as notifications whenever they change.

use uuid::Uuid;

use crate::event::ScannerEvent;
use crate::types::{Serial, WifiInfo};

/// Power service.
pub const POWER_SERVICE: Uuid = Uuid::from_u128(0x8C85_3B6A_2297_44C1_8277_7362_7C8D_2ABC);
/// Power state characteristic published by the scanner.
pub const POWER_PUBLISHED: Uuid = Uuid::from_u128(0x8C85_3B6A_2297_44C1_8277_7362_7C8D_2ABD);
/// Power request characteristic written by the client.
pub const POWER_REQUEST: Uuid = Uuid::from_u128(0x8C85_3B6A_2297_44C1_8277_7362_7C8D_2ABE);

/// Wi-Fi service.
pub const WIFI_SERVICE: Uuid = Uuid::from_u128(0xF9EB_3FAE_947A_4E5B_AB7C_C799_E91E_D780);
/// Wi-Fi configuration characteristic published by the scanner.
pub const WIFI_PUBLISHED: Uuid = Uuid::from_u128(0xF9EB_3FAE_947A_4E5B_AB7C_C799_E91E_D781);

/// Client characteristic configuration descriptor, written to enable notifications.
pub const CLIENT_CONFIG_DESCRIPTOR: Uuid =
    Uuid::from_u128(0x0000_2902_0000_1000_8000_0080_5F9B_34FB);

/// MTU requested after connecting; the Wi-Fi payload does not fit the default.
pub const REQUESTED_MTU: u16 = 512;

/// Value written to [`CLIENT_CONFIG_DESCRIPTOR`] to enable notifications.
pub const ENABLE_NOTIFICATION_VALUE: [u8; 2] = [0x01, 0x00];

/// Encodes a power request: `1` to power on, `0` to power off.
///
/// # Examples
///
/// ```
/// use scanbus::discovery::gatt::power_request;
///
/// assert_eq!(power_request(true), [1]);
/// assert_eq!(power_request(false), [0]);
/// ```
#[must_use]
pub fn power_request(on: bool) -> [u8; 1] {
    [u8::from(on)]
}

// ============================================================================
// GattOperation
// ============================================================================

/// One GATT operation to hand to the platform BLE stack.
///
/// Operations are queued on a [`CommandQueue`](super::CommandQueue) so that
/// only one is outstanding per connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GattOperation {
    /// Request a larger MTU.
    RequestMtu(u16),
    /// Read a characteristic once.
    Read {
        /// Service holding the characteristic.
        service: Uuid,
        /// Characteristic to read.
        characteristic: Uuid,
    },
    /// Enable notifications for a characteristic by writing
    /// [`ENABLE_NOTIFICATION_VALUE`] to its [`CLIENT_CONFIG_DESCRIPTOR`].
    Subscribe {
        /// Service holding the characteristic.
        service: Uuid,
        /// Characteristic to subscribe to.
        characteristic: Uuid,
    },
    /// Write a characteristic without response.
    Write {
        /// Service holding the characteristic.
        service: Uuid,
        /// Characteristic to write.
        characteristic: Uuid,
        /// Bytes to write.
        value: Vec<u8>,
    },
}

impl GattOperation {
    /// Creates the write that powers the scanner on or off.
    #[must_use]
    pub fn power_request(on: bool) -> Self {
        Self::Write {
            service: POWER_SERVICE,
            characteristic: POWER_REQUEST,
            value: power_request(on).to_vec(),
        }
    }

    /// Operations to run once services are discovered: raise the MTU,
    /// subscribe to both published characteristics, then read their
    /// current values.
    #[must_use]
    pub fn connection_setup() -> Vec<Self> {
        let published = [(POWER_SERVICE, POWER_PUBLISHED), (WIFI_SERVICE, WIFI_PUBLISHED)];

        let mut operations = vec![Self::RequestMtu(REQUESTED_MTU)];
        operations.extend(
            published
                .iter()
                .map(|&(service, characteristic)| Self::Subscribe { service, characteristic }),
        );
        operations.extend(
            published
                .iter()
                .map(|&(service, characteristic)| Self::Read { service, characteristic }),
        );
        operations
    }

    /// Returns the descriptor write this operation needs, if any.
    #[must_use]
    pub fn descriptor_write(&self) -> Option<(Uuid, [u8; 2])> {
        match self {
            Self::Subscribe { .. } => Some((CLIENT_CONFIG_DESCRIPTOR, ENABLE_NOTIFICATION_VALUE)),
            _ => None,
        }
    }
}

/// Decodes the power characteristic: powered if any byte is non-zero.
///
/// # Examples
///
/// ```
/// use scanbus::discovery::gatt::decode_power;
///
/// assert!(decode_power(&[0x00, 0x01]));
/// assert!(!decode_power(&[0x00, 0x00]));
/// assert!(!decode_power(&[]));
/// ```
#[must_use]
pub fn decode_power(value: &[u8]) -> bool {
    value.iter().any(|&b| b != 0)
}

/// Decodes the Wi-Fi characteristic.
///
/// The payload is ASCII text; any non-UTF-8 bytes are replaced rather than
/// rejected.
#[must_use]
pub fn decode_wifi(value: &[u8]) -> WifiInfo {
    WifiInfo::from_payload(&String::from_utf8_lossy(value))
}

/// Converts a characteristic value received from a scanner into the
/// notification it represents.
///
/// Returns `None` for characteristics that carry no notification.
#[must_use]
pub fn characteristic_event(
    serial: &Serial,
    characteristic: Uuid,
    value: &[u8],
) -> Option<ScannerEvent> {
    if characteristic == POWER_PUBLISHED {
        Some(ScannerEvent::power_changed(serial.clone(), decode_power(value)))
    } else if characteristic == WIFI_PUBLISHED {
        Some(ScannerEvent::wifi_info_received(
            serial.clone(),
            decode_wifi(value),
        ))
    } else {
        tracing::trace!(%characteristic, serial = %serial, "Ignoring characteristic");
        None
    }
}
