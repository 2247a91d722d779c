// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of known scanners.

use std::collections::BTreeMap;

use super::Observable;
use crate::discovery::{DiscoveredDevice, DiscoveryConfig};
use crate::event::{NotificationBus, ScannerEvent};
use crate::subscription::{Subscribable, Subscription};
use crate::types::{Scanner, Serial};

type ScannerMap = BTreeMap<Serial, Scanner>;

/// Every scanner the application knows about, keyed by serial.
///
/// The registry assembles a [`Scanner`] record from the notifications that
/// concern it:
///
/// - `device-found` for a device that advertises as a scanner creates the
///   record, with its BLE address and inferred BSSID
/// - `power-state-changed` sets `powered`
/// - `wifi-info-received` sets the Wi-Fi info (and BSSID, if reported)
/// - `cloud-record-received` attaches the cloud record
///
/// Power, Wi-Fi and cloud notifications for an unknown serial create the
/// record on demand. [`last_updated`](Self::last_updated) names the most
/// recently changed scanner.
#[derive(Debug)]
pub struct ScannersModel {
    scanners: Observable<ScannerMap>,
    last_updated: Observable<Option<Serial>>,
    _subscriptions: Vec<Subscription>,
}

/// Applies `f` to the scanner for `serial`, creating it if needed, and
/// records the serial as last updated if anything changed. Creating the
/// record counts as a change.
fn modify(
    scanners: &Observable<ScannerMap>,
    last_updated: &Observable<Option<Serial>>,
    serial: &Serial,
    f: impl FnOnce(&mut Scanner) -> bool,
) {
    let changed = scanners.update(|map| {
        let inserted = !map.contains_key(serial);
        let scanner = map
            .entry(serial.clone())
            .or_insert_with(|| Scanner::new(serial.clone()));
        f(scanner) || inserted
    });
    if changed {
        last_updated.set(Some(serial.clone()));
    }
}

impl ScannersModel {
    /// Creates the registry and subscribes it to `bus`.
    ///
    /// `discovery` decides which discovered devices are scanners.
    #[must_use]
    pub fn attach(bus: &NotificationBus, discovery: DiscoveryConfig) -> Self {
        let scanners: Observable<ScannerMap> = Observable::new(BTreeMap::new());
        let last_updated = Observable::new(None);

        let on_found = {
            let scanners = scanners.clone();
            let last_updated = last_updated.clone();
            bus.on_device_found(move |device: &DiscoveredDevice| {
                let Some(serial) = discovery.scanner_serial(device) else {
                    return;
                };
                let added = scanners.update(|map| {
                    if map.contains_key(&serial) {
                        return false;
                    }
                    let mut scanner = Scanner::new(serial.clone());
                    scanner.bluetooth_addr = Some(device.address);
                    scanner.bssid = device.inferred_bssid();
                    map.insert(serial.clone(), scanner);
                    true
                });
                if added {
                    tracing::debug!(
                        serial = %serial,
                        address = %device.address,
                        "Scanner discovered"
                    );
                    last_updated.set(Some(serial));
                }
            })
        };

        let on_power = {
            let scanners = scanners.clone();
            let last_updated = last_updated.clone();
            bus.on_power_changed(move |serial, powered| {
                modify(&scanners, &last_updated, serial, |scanner| {
                    let changed = scanner.powered != powered;
                    scanner.powered = powered;
                    changed
                });
            })
        };

        let on_wifi = {
            let scanners = scanners.clone();
            let last_updated = last_updated.clone();
            bus.on_wifi_info_received(move |serial, info| {
                modify(&scanners, &last_updated, serial, |scanner| {
                    if scanner.wifi_info.as_ref() == Some(info) {
                        return false;
                    }
                    scanner.apply_wifi_info(info.clone());
                    true
                });
            })
        };

        let on_cloud = {
            let scanners = scanners.clone();
            let last_updated = last_updated.clone();
            bus.on_cloud_record_received(move |record| {
                modify(&scanners, &last_updated, &record.serial, |scanner| {
                    if scanner.cloud.as_ref() == Some(record) {
                        return false;
                    }
                    scanner.cloud = Some(record.clone());
                    true
                });
            })
        };

        Self {
            scanners,
            last_updated,
            _subscriptions: vec![on_found, on_power, on_wifi, on_cloud],
        }
    }

    /// Returns the observable scanner map.
    #[must_use]
    pub fn scanners(&self) -> &Observable<BTreeMap<Serial, Scanner>> {
        &self.scanners
    }

    /// Returns the observable serial of the most recently changed scanner.
    #[must_use]
    pub fn last_updated(&self) -> &Observable<Option<Serial>> {
        &self.last_updated
    }

    /// Returns the scanner with `serial`.
    #[must_use]
    pub fn scanner(&self, serial: &Serial) -> Option<Scanner> {
        self.scanners.with(|map| map.get(serial).cloned())
    }

    /// Returns the number of known scanners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scanners.with(BTreeMap::len)
    }

    /// Returns `true` if no scanner is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Publishes `device-details-requested` for a known scanner.
    ///
    /// Returns `false` (and publishes nothing) if the serial is unknown.
    pub fn request_details(&self, bus: &NotificationBus, serial: &Serial) -> bool {
        let Some(scanner) = self.scanner(serial) else {
            tracing::debug!(serial = %serial, "Details requested for unknown scanner");
            return false;
        };
        bus.publish(ScannerEvent::details_requested(scanner));
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::types::{MacAddress, ScannerCloud, WifiInfo};

    fn serial() -> Serial {
        Serial::new("CUS-0042").unwrap()
    }

    fn scanner_found(last: u8) -> ScannerEvent {
        ScannerEvent::device_found(
            DiscoveredDevice::new(MacAddress::new([0xA4, 0, 0, 0, 0, last])).with_name("CUS-0042"),
        )
    }

    fn attach() -> (NotificationBus, ScannersModel) {
        let bus = NotificationBus::new();
        let model = ScannersModel::attach(&bus, DiscoveryConfig::default());
        (bus, model)
    }

    #[test]
    fn discovered_scanner_gets_inferred_bssid() {
        let (bus, model) = attach();
        bus.publish(scanner_found(0x10));

        let scanner = model.scanner(&serial()).unwrap();
        assert_eq!(scanner.bluetooth_addr, Some(MacAddress::new([0xA4, 0, 0, 0, 0, 0x10])));
        assert_eq!(scanner.bssid, Some(MacAddress::new([0xA4, 0, 0, 0, 0, 0x11])));
        assert_eq!(model.last_updated().get(), Some(serial()));
    }

    #[test]
    fn no_bssid_when_last_octet_saturated() {
        let (bus, model) = attach();
        bus.publish(scanner_found(0xFF));
        assert_eq!(model.scanner(&serial()).unwrap().bssid, None);
    }

    #[test]
    fn non_scanner_devices_are_ignored() {
        let (bus, model) = attach();
        bus.publish(ScannerEvent::device_found(
            DiscoveredDevice::new(MacAddress::new([1, 2, 3, 4, 5, 6])).with_name("Headphones"),
        ));
        assert!(model.is_empty());
        assert_eq!(model.last_updated().get(), None);
    }

    #[test]
    fn rediscovery_keeps_first_record() {
        let (bus, model) = attach();
        bus.publish(scanner_found(0x10));
        bus.publish(ScannerEvent::power_changed(serial(), true));
        bus.publish(scanner_found(0x20));

        let scanner = model.scanner(&serial()).unwrap();
        assert!(scanner.powered);
        assert_eq!(scanner.bluetooth_addr, Some(MacAddress::new([0xA4, 0, 0, 0, 0, 0x10])));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn power_wifi_and_cloud_are_merged() {
        let (bus, model) = attach();
        bus.publish(scanner_found(0x10));
        bus.publish(ScannerEvent::power_changed(serial(), true));
        bus.publish(ScannerEvent::wifi_info_received(
            serial(),
            WifiInfo::from_payload("ssid: DIRECT-0042\npw: pass\nbssid: 02:00:00:00:00:99"),
        ));
        bus.publish(ScannerEvent::cloud_record_received(
            ScannerCloud::new(serial()).with_certificate("crt"),
        ));

        let scanner = model.scanner(&serial()).unwrap();
        assert!(scanner.powered);
        assert!(scanner.can_join_wifi());
        assert_eq!(scanner.bssid, Some(MacAddress::new([2, 0, 0, 0, 0, 0x99])));
        assert!(scanner.cloud.unwrap().is_authenticated());
    }

    #[test]
    fn unknown_serial_created_on_demand() {
        let (bus, model) = attach();
        bus.publish(ScannerEvent::power_changed(serial(), true));

        let scanner = model.scanner(&serial()).unwrap();
        assert!(scanner.powered);
        assert_eq!(scanner.bluetooth_addr, None);
    }

    #[test]
    fn created_on_demand_notifies_even_without_field_change() {
        let (bus, model) = attach();
        let renders = Arc::new(Mutex::new(0));

        let renders_clone = renders.clone();
        model.scanners().observe(move |_| *renders_clone.lock() += 1);

        // `powered: false` matches the default, yet the record is new.
        bus.publish(ScannerEvent::power_changed(serial(), false));

        assert_eq!(model.len(), 1);
        assert_eq!(*renders.lock(), 1);
        assert_eq!(model.last_updated().get(), Some(serial()));

        bus.publish(ScannerEvent::power_changed(serial(), false));
        assert_eq!(*renders.lock(), 1);
    }

    #[test]
    fn unchanged_power_does_not_notify() {
        let (bus, model) = attach();
        bus.publish(scanner_found(0x10));

        let renders = Arc::new(Mutex::new(0));
        let renders_clone = renders.clone();
        model.scanners().observe(move |_| *renders_clone.lock() += 1);

        bus.publish(ScannerEvent::power_changed(serial(), false));
        bus.publish(ScannerEvent::power_changed(serial(), true));
        bus.publish(ScannerEvent::power_changed(serial(), true));

        assert_eq!(*renders.lock(), 1);
    }

    #[test]
    fn request_details_publishes_known_scanner() {
        let (bus, model) = attach();
        let requested = Arc::new(Mutex::new(None));

        let requested_clone = requested.clone();
        let _sub = bus.on_details_requested(move |scanner| {
            *requested_clone.lock() = Some(scanner.serial.clone());
        });

        assert!(!model.request_details(&bus, &serial()));
        assert!(requested.lock().is_none());

        bus.publish(scanner_found(0x10));
        assert!(model.request_details(&bus, &serial()));
        assert_eq!(*requested.lock(), Some(serial()));
    }
}
