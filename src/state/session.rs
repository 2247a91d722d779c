// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session state: which scanner is selected and what details are shown.

use super::Observable;
use crate::event::NotificationBus;
use crate::subscription::{Subscribable, Subscription};
use crate::types::{Scanner, Serial};

/// State of the current scanner session.
///
/// Follows `scanner-selection-changed` and `device-details-requested`.
/// When the selection moves to another scanner, details shown for the
/// previous one are cleared.
#[derive(Debug)]
pub struct SessionModel {
    selected: Observable<Option<Serial>>,
    details: Observable<Option<Scanner>>,
    _subscriptions: Vec<Subscription>,
}

impl SessionModel {
    /// Creates the model and subscribes it to `bus`.
    #[must_use]
    pub fn attach(bus: &NotificationBus) -> Self {
        let selected = Observable::new(None);
        let details = Observable::new(None);

        let on_selection = {
            let selected = selected.clone();
            let details = details.clone();
            bus.on_scanner_selection_changed(move |serial| {
                if selected.set_if_changed(Some(serial.clone())) {
                    tracing::debug!(serial = %serial, "Scanner selected");
                }
                details.update(|shown: &mut Option<Scanner>| {
                    if shown.as_ref().is_some_and(|s| s.serial != *serial) {
                        *shown = None;
                        return true;
                    }
                    false
                });
            })
        };

        let on_details = {
            let details = details.clone();
            bus.on_details_requested(move |scanner| {
                details.set(Some(scanner.clone()));
            })
        };

        Self {
            selected,
            details,
            _subscriptions: vec![on_selection, on_details],
        }
    }

    /// Returns the observable selected serial.
    #[must_use]
    pub fn selected(&self) -> &Observable<Option<Serial>> {
        &self.selected
    }

    /// Returns the observable details record.
    #[must_use]
    pub fn details(&self) -> &Observable<Option<Scanner>> {
        &self.details
    }

    /// Returns the selected serial, if any.
    #[must_use]
    pub fn selected_serial(&self) -> Option<Serial> {
        self.selected.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ScannerEvent;

    fn serial(s: &str) -> Serial {
        Serial::new(s).unwrap()
    }

    #[test]
    fn follows_selection() {
        let bus = NotificationBus::new();
        let session = SessionModel::attach(&bus);
        assert_eq!(session.selected_serial(), None);

        bus.publish(ScannerEvent::selection_changed(serial("CUS-1")));
        assert_eq!(session.selected_serial(), Some(serial("CUS-1")));
    }

    #[test]
    fn details_cleared_when_selection_moves() {
        let bus = NotificationBus::new();
        let session = SessionModel::attach(&bus);

        bus.publish(ScannerEvent::details_requested(Scanner::new(serial("CUS-1"))));
        assert!(session.details().get().is_some());

        bus.publish(ScannerEvent::selection_changed(serial("CUS-1")));
        assert!(session.details().get().is_some());

        bus.publish(ScannerEvent::selection_changed(serial("CUS-2")));
        assert!(session.details().get().is_none());
    }

    #[test]
    fn drop_releases_subscriptions() {
        let bus = NotificationBus::new();
        let session = SessionModel::attach(&bus);
        assert_eq!(bus.subscriber_count(), 2);

        drop(session);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
