// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for notification subscriptions.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Ordered registry for storing and dispatching callbacks

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::event::{EventKind, ScannerEvent};

/// Unique identifier for a subscription.
///
/// IDs are unique within a registry's lifetime and increase with
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Type alias for notification callbacks.
type EventCallback = Arc<dyn Fn(&ScannerEvent) + Send + Sync>;

struct Registration {
    id: SubscriptionId,
    /// `None` receives every kind.
    filter: Option<EventKind>,
    /// Cleared on unsubscribe so an in-flight dispatch skips the callback.
    active: Arc<AtomicBool>,
    callback: EventCallback,
}

impl Registration {
    fn accepts(&self, kind: EventKind) -> bool {
        self.filter.is_none_or(|filter| filter == kind)
    }
}

/// Registry for notification callbacks.
///
/// Registrations are kept in registration order and dispatched in that
/// order. Dispatch works on a snapshot taken under a read lock and invokes
/// callbacks with no lock held, so callbacks may publish, subscribe or
/// unsubscribe re-entrantly.
///
/// # Thread Safety
///
/// The registry uses `parking_lot::RwLock` and can be shared across
/// threads. Callbacks are wrapped in `Arc` so snapshots are cheap.
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Registrations in registration order.
    registrations: RwLock<Vec<Registration>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            registrations: RwLock::new(Vec::new()),
        }
    }

    /// Generates a new unique subscription ID.
    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a callback for one notification kind, or for every kind when
    /// `filter` is `None`.
    pub fn register<F>(&self, filter: Option<EventKind>, callback: F) -> SubscriptionId
    where
        F: Fn(&ScannerEvent) + Send + Sync + 'static,
    {
        let mut registrations = self.registrations.write();
        // Allocated under the write lock so vector order matches ID order.
        let id = self.next_id();
        registrations.push(Registration {
            id,
            filter,
            active: Arc::new(AtomicBool::new(true)),
            callback: Arc::new(callback),
        });
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed. Removing an ID
    /// twice is harmless; the second call returns `false`.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registrations = self.registrations.write();
        let Some(position) = registrations.iter().position(|r| r.id == id) else {
            return false;
        };
        let removed = registrations.remove(position);
        removed.active.store(false, Ordering::Release);
        true
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        let mut registrations = self.registrations.write();
        for registration in registrations.drain(..) {
            registration.active.store(false, Ordering::Release);
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatches a notification to every matching callback.
    ///
    /// Callbacks run synchronously on the calling thread in registration
    /// order. Callbacks registered during this call are not invoked; callbacks
    /// unsubscribed during this call are not invoked if they had not yet run.
    ///
    /// Returns the number of callbacks invoked.
    pub fn dispatch(&self, event: &ScannerEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<(Arc<AtomicBool>, EventCallback)> = self
            .registrations
            .read()
            .iter()
            .filter(|r| r.accepts(kind))
            .map(|r| (Arc::clone(&r.active), Arc::clone(&r.callback)))
            .collect();

        let mut invoked = 0;
        for (active, callback) in snapshot {
            if active.load(Ordering::Acquire) {
                callback(event);
                invoked += 1;
            }
        }
        invoked
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.registrations.read().len()
    }

    /// Returns the number of callbacks a notification of `kind` would reach.
    #[must_use]
    pub fn callback_count_for(&self, kind: EventKind) -> usize {
        self.registrations
            .read()
            .iter()
            .filter(|r| r.accepts(kind))
            .count()
    }

    /// Returns `true` if `id` is currently registered.
    #[must_use]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.registrations.read().iter().any(|r| r.id == id)
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
