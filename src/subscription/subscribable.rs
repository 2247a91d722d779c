// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for notification sources.

use crate::discovery::DiscoveredDevice;
use crate::event::{EventKind, ScannerEvent};
use crate::subscription::{Subscription, SubscriptionId};
use crate::types::{Scanner, ScannerCloud, Serial, WifiInfo};

/// Trait for types that deliver notifications to subscribers.
///
/// Implementors provide [`on_event`](Self::on_event),
/// [`on_any_event`](Self::on_any_event) and
/// [`unsubscribe`](Self::unsubscribe); the typed helpers are built on top
/// and hand the handler the payload fields of one notification directly.
///
/// # Examples
///
/// ```
/// use scanbus::event::{NotificationBus, ScannerEvent};
/// use scanbus::subscription::Subscribable;
/// use scanbus::types::Serial;
///
/// let bus = NotificationBus::new();
///
/// let _sub = bus.on_power_changed(|serial, powered| {
///     println!("{serial} powered: {powered}");
/// });
///
/// bus.publish(ScannerEvent::power_changed(Serial::new("ABC123").unwrap(), true));
/// ```
pub trait Subscribable {
    /// Subscribes to every notification of one kind.
    fn on_event<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&ScannerEvent) + Send + Sync + 'static;

    /// Subscribes to every notification regardless of kind.
    ///
    /// This is useful for logging or when you need to react to any change.
    fn on_any_event<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ScannerEvent) + Send + Sync + 'static;

    /// Unsubscribes a handler by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Subscribes to scanner selection changes.
    fn on_scanner_selection_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Serial) + Send + Sync + 'static,
    {
        self.on_event(EventKind::ScannerSelectionChanged, move |event| {
            let ScannerEvent::ScannerSelectionChanged { serial } = event else {
                mismatched(EventKind::ScannerSelectionChanged, event)
            };
            handler(serial);
        })
    }

    /// Subscribes to BLE discovery results.
    fn on_device_found<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&DiscoveredDevice) + Send + Sync + 'static,
    {
        self.on_event(EventKind::DeviceFound, move |event| {
            let ScannerEvent::DeviceFound { device } = event else {
                mismatched(EventKind::DeviceFound, event)
            };
            handler(device);
        })
    }

    /// Subscribes to power state changes.
    ///
    /// The handler receives the scanner serial and whether it is powered.
    fn on_power_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Serial, bool) + Send + Sync + 'static,
    {
        self.on_event(EventKind::PowerStateChanged, move |event| {
            let ScannerEvent::PowerStateChanged { serial, powered } = event else {
                mismatched(EventKind::PowerStateChanged, event)
            };
            handler(serial, *powered);
        })
    }

    /// Subscribes to Wi-Fi info reports.
    fn on_wifi_info_received<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Serial, &WifiInfo) + Send + Sync + 'static,
    {
        self.on_event(EventKind::WifiInfoReceived, move |event| {
            let ScannerEvent::WifiInfoReceived { serial, wifi_info } = event else {
                mismatched(EventKind::WifiInfoReceived, event)
            };
            handler(serial, wifi_info);
        })
    }

    /// Subscribes to cloud records.
    fn on_cloud_record_received<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ScannerCloud) + Send + Sync + 'static,
    {
        self.on_event(EventKind::CloudRecordReceived, move |event| {
            let ScannerEvent::CloudRecordReceived { scanner_cloud } = event else {
                mismatched(EventKind::CloudRecordReceived, event)
            };
            handler(scanner_cloud);
        })
    }

    /// Subscribes to details requests.
    fn on_details_requested<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Scanner) + Send + Sync + 'static,
    {
        self.on_event(EventKind::DeviceDetailsRequested, move |event| {
            let ScannerEvent::DeviceDetailsRequested { scanner } = event else {
                mismatched(EventKind::DeviceDetailsRequested, event)
            };
            handler(scanner);
        })
    }
}

/// A typed handler only ever sees the kind it was registered for.
#[cold]
fn mismatched(expected: EventKind, event: &ScannerEvent) -> ! {
    panic!(
        "handler registered for {expected} received {}",
        event.kind()
    )
}
