// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification bus for broadcasting scanner notifications.

use std::sync::Arc;

use super::{EventKind, ScannerEvent};
use crate::subscription::{CallbackRegistry, Subscribable, Subscription, SubscriptionId};

/// Bus that broadcasts [`ScannerEvent`]s to subscribed handlers.
///
/// Publishing is synchronous: [`publish`](Self::publish) runs every handler
/// subscribed to the notification's kind on the calling thread, in
/// registration order, before returning. The bus keeps no history, so a
/// handler only sees notifications published after it subscribed.
///
/// Handlers are meant to run on one owner thread (the UI thread). Producers
/// on other threads should hand their notifications to an
/// [`EventQueue`](super::EventQueue) instead of calling `publish` directly.
///
/// Cloning the bus is cheap; clones share the same subscribers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use scanbus::event::{EventKind, NotificationBus, ScannerEvent};
/// use scanbus::types::Serial;
///
/// let bus = NotificationBus::new();
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let seen_clone = seen.clone();
/// let subscription = bus.subscribe(EventKind::PowerStateChanged, move |_event| {
///     seen_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let serial = Serial::new("ABC123").unwrap();
/// bus.publish(ScannerEvent::power_changed(serial.clone(), true));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
///
/// // Dropping the handle unsubscribes.
/// drop(subscription);
/// bus.publish(ScannerEvent::power_changed(serial, false));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotificationBus {
    registry: Arc<CallbackRegistry>,
}

impl NotificationBus {
    /// Creates a new bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a handler to every future notification of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&ScannerEvent) + Send + Sync + 'static,
    {
        let id = self.registry.register(Some(kind), handler);
        tracing::trace!(subscription = %id, kind = %kind, "Handler subscribed");
        Subscription::new(id, &self.registry)
    }

    /// Subscribes a handler to every future notification of any kind.
    pub fn subscribe_all<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ScannerEvent) + Send + Sync + 'static,
    {
        let id = self.registry.register(None, handler);
        tracing::trace!(subscription = %id, "Handler subscribed to all notifications");
        Subscription::new(id, &self.registry)
    }

    /// Removes a handler by subscription ID.
    ///
    /// Idempotent: returns `true` the first time, `false` afterwards.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.registry.unsubscribe(id);
        if removed {
            tracing::trace!(subscription = %id, "Handler unsubscribed");
        }
        removed
    }

    /// Publishes a notification to all current subscribers of its kind.
    ///
    /// If there are no subscribers, the notification is discarded.
    pub fn publish(&self, event: ScannerEvent) {
        let _ = self.publish_counted(event);
    }

    /// Publishes a notification and returns how many handlers ran.
    #[must_use]
    pub fn publish_counted(&self, event: ScannerEvent) -> usize {
        let invoked = self.registry.dispatch(&event);
        tracing::debug!(
            event = event.name(),
            serial = ?event.serial().map(crate::types::Serial::as_str),
            handlers = invoked,
            "Published notification"
        );
        invoked
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.callback_count()
    }

    /// Returns the number of handlers a notification of `kind` would reach.
    #[must_use]
    pub fn subscriber_count_for(&self, kind: EventKind) -> usize {
        self.registry.callback_count_for(kind)
    }

    /// Removes every subscription.
    pub fn clear(&self) {
        self.registry.clear();
    }
}

impl Subscribable for NotificationBus {
    fn on_event<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&ScannerEvent) + Send + Sync + 'static,
    {
        self.subscribe(kind, handler)
    }

    fn on_any_event<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ScannerEvent) + Send + Sync + 'static,
    {
        self.subscribe_all(handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        NotificationBus::unsubscribe(self, id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use parking_lot::Mutex;

    use super::*;
    use crate::types::{Serial, WifiInfo};

    fn serial() -> Serial {
        Serial::new("ABC123").unwrap()
    }

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = NotificationBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn subscribe_increments_count() {
        let bus = NotificationBus::new();

        let _s1 = bus.subscribe(EventKind::DeviceFound, |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        let _s2 = bus.subscribe_all(|_| {});
        assert_eq!(bus.subscriber_count(), 2);
        assert_eq!(bus.subscriber_count_for(EventKind::DeviceFound), 2);
        assert_eq!(bus.subscriber_count_for(EventKind::PowerStateChanged), 1);
    }

    #[test]
    fn drop_subscription_decrements_count() {
        let bus = NotificationBus::new();

        let sub = bus.subscribe_all(|_| {});
        assert_eq!(bus.subscriber_count(), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_counted_returns_handler_count() {
        let bus = NotificationBus::new();
        let _s1 = bus.subscribe(EventKind::PowerStateChanged, |_| {});
        let _s2 = bus.subscribe(EventKind::WifiInfoReceived, |_| {});

        assert_eq!(bus.publish_counted(ScannerEvent::power_changed(serial(), true)), 1);
        assert_eq!(bus.publish_counted(ScannerEvent::selection_changed(serial())), 0);
    }

    #[test]
    fn clone_shares_subscribers() {
        let bus1 = NotificationBus::new();
        let bus2 = bus1.clone();

        let _sub = bus1.subscribe_all(|_| {});
        assert_eq!(bus2.subscriber_count(), 1);
    }

    #[test]
    fn typed_helpers_receive_payload() {
        let bus = NotificationBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let _power = bus.on_power_changed(move |serial, powered| {
            received_clone.lock().push(format!("power {serial} {powered}"));
        });
        let received_clone = received.clone();
        let _wifi = bus.on_wifi_info_received(move |serial, info| {
            received_clone
                .lock()
                .push(format!("wifi {serial} {:?}", info.ssid));
        });

        bus.publish(ScannerEvent::power_changed(serial(), true));
        bus.publish(ScannerEvent::wifi_info_received(
            serial(),
            WifiInfo::from_payload("ssid: lab"),
        ));
        bus.publish(ScannerEvent::selection_changed(serial()));

        assert_eq!(
            *received.lock(),
            vec![
                "power ABC123 true".to_string(),
                "wifi ABC123 Some(\"lab\")".to_string()
            ]
        );
    }

    #[test]
    fn handler_may_publish_reentrantly() {
        let bus = NotificationBus::new();
        let power_calls = Arc::new(AtomicU32::new(0));

        let inner_bus = bus.clone();
        let _selection = bus.on_scanner_selection_changed(move |serial| {
            inner_bus.publish(ScannerEvent::power_changed(serial.clone(), true));
        });
        let power_calls_clone = power_calls.clone();
        let _power = bus.on_power_changed(move |_, _| {
            power_calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(ScannerEvent::selection_changed(serial()));
        assert_eq!(power_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_by_id_through_trait() {
        let bus = NotificationBus::new();
        let id = bus.on_any_event(|_| {}).detach();

        assert!(Subscribable::unsubscribe(&bus, id));
        assert!(!Subscribable::unsubscribe(&bus, id));
    }

    #[test]
    fn clear_removes_everything() {
        let bus = NotificationBus::new();
        let sub = bus.subscribe_all(|_| {});
        bus.clear();

        assert_eq!(bus.subscriber_count(), 0);
        assert!(!sub.is_active());
    }
}
