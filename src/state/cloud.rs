// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud sync state.

use std::collections::BTreeMap;

use super::Observable;
use crate::event::NotificationBus;
use crate::subscription::{Subscribable, Subscription};
use crate::types::{ScannerCloud, Serial};

/// Cloud records received so far, keyed by serial.
///
/// A newer record for the same serial replaces the older one.
#[derive(Debug)]
pub struct CloudModel {
    records: Observable<BTreeMap<Serial, ScannerCloud>>,
    _subscriptions: Vec<Subscription>,
}

impl CloudModel {
    /// Creates the model and subscribes it to `bus`.
    #[must_use]
    pub fn attach(bus: &NotificationBus) -> Self {
        let records = Observable::new(BTreeMap::new());

        let on_record = {
            let records = records.clone();
            bus.on_cloud_record_received(move |record| {
                records.update(|map: &mut BTreeMap<Serial, ScannerCloud>| {
                    if map.get(&record.serial) == Some(record) {
                        return false;
                    }
                    map.insert(record.serial.clone(), record.clone());
                    true
                });
            })
        };

        Self {
            records,
            _subscriptions: vec![on_record],
        }
    }

    /// Returns the observable records.
    #[must_use]
    pub fn records(&self) -> &Observable<BTreeMap<Serial, ScannerCloud>> {
        &self.records
    }

    /// Returns the record for `serial`.
    #[must_use]
    pub fn record(&self, serial: &Serial) -> Option<ScannerCloud> {
        self.records.with(|map| map.get(serial).cloned())
    }

    /// Returns the serials that have a certificate.
    #[must_use]
    pub fn authenticated(&self) -> Vec<Serial> {
        self.records.with(|map| {
            map.values()
                .filter(|record| record.is_authenticated())
                .map(|record| record.serial.clone())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::event::ScannerEvent;

    fn record(serial: &str, crt: Option<&str>) -> ScannerCloud {
        let record = ScannerCloud::new(Serial::new(serial).unwrap());
        match crt {
            Some(crt) => record.with_certificate(crt),
            None => record,
        }
    }

    #[test]
    fn stores_latest_record_per_serial() {
        let bus = NotificationBus::new();
        let model = CloudModel::attach(&bus);

        bus.publish(ScannerEvent::cloud_record_received(record("CUS-1", None)));
        bus.publish(ScannerEvent::cloud_record_received(record("CUS-1", Some("crt"))));
        bus.publish(ScannerEvent::cloud_record_received(record("CUS-2", None)));

        let serial = Serial::new("CUS-1").unwrap();
        assert_eq!(model.record(&serial), Some(record("CUS-1", Some("crt"))));
        assert_eq!(model.authenticated(), vec![serial]);
        assert_eq!(model.records().with(BTreeMap::len), 2);
    }

    #[test]
    fn identical_record_does_not_notify() {
        let bus = NotificationBus::new();
        let model = CloudModel::attach(&bus);
        let renders = Arc::new(AtomicU32::new(0));

        let renders_clone = renders.clone();
        model.records().observe(move |_| {
            renders_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(ScannerEvent::cloud_record_received(record("CUS-1", None)));
        bus.publish(ScannerEvent::cloud_record_received(record("CUS-1", None)));

        assert_eq!(renders.load(Ordering::SeqCst), 1);
    }
}
