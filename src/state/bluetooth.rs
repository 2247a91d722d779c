// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BLE transport state: scan status and discovered devices.

use std::collections::BTreeMap;
use std::fmt;

use super::Observable;
use crate::discovery::DiscoveredDevice;
use crate::event::NotificationBus;
use crate::subscription::{Subscribable, Subscription};
use crate::types::MacAddress;

/// Status of the BLE scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanStatus {
    /// No scan is running.
    #[default]
    Stopped,
    /// A scan is running.
    Scanning,
    /// The last scan could not be started or failed.
    Error,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stopped => "stopped",
            Self::Scanning => "scanning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// State of the BLE transport.
///
/// Collects every device reported by `device-found`, keyed by address. The
/// first report for an address is kept; later reports for the same address
/// are ignored until the next scan starts.
#[derive(Debug)]
pub struct BluetoothModel {
    devices: Observable<BTreeMap<MacAddress, DiscoveredDevice>>,
    scan_status: Observable<ScanStatus>,
    _subscriptions: Vec<Subscription>,
}

impl BluetoothModel {
    /// Creates the model and subscribes it to `bus`.
    #[must_use]
    pub fn attach(bus: &NotificationBus) -> Self {
        let devices = Observable::new(BTreeMap::new());

        let on_found = {
            let devices = devices.clone();
            bus.on_device_found(move |device| {
                let added = devices.update(|map: &mut BTreeMap<MacAddress, DiscoveredDevice>| {
                    if map.contains_key(&device.address) {
                        return false;
                    }
                    map.insert(device.address, device.clone());
                    true
                });
                if added {
                    tracing::debug!(address = %device.address, name = %device, "BLE device found");
                }
            })
        };

        Self {
            devices,
            scan_status: Observable::new(ScanStatus::Stopped),
            _subscriptions: vec![on_found],
        }
    }

    /// Marks a scan as started, forgetting previously discovered devices.
    pub fn start_scan(&self) {
        self.devices.set(BTreeMap::new());
        self.scan_status.set_if_changed(ScanStatus::Scanning);
    }

    /// Marks the scan as stopped. Discovered devices are kept.
    pub fn stop_scan(&self) {
        self.scan_status.set_if_changed(ScanStatus::Stopped);
    }

    /// Marks the scan as failed.
    pub fn scan_failed(&self) {
        tracing::warn!("BLE scan failed");
        self.scan_status.set_if_changed(ScanStatus::Error);
    }

    /// Returns the observable discovered devices.
    #[must_use]
    pub fn devices(&self) -> &Observable<BTreeMap<MacAddress, DiscoveredDevice>> {
        &self.devices
    }

    /// Returns the observable scan status.
    #[must_use]
    pub fn scan_status(&self) -> &Observable<ScanStatus> {
        &self.scan_status
    }

    /// Returns the device discovered at `address`.
    #[must_use]
    pub fn device(&self, address: MacAddress) -> Option<DiscoveredDevice> {
        self.devices.with(|map| map.get(&address).cloned())
    }

    /// Returns the number of discovered devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.with(BTreeMap::len)
    }
}
