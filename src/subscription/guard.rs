// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped subscription handle.

use std::sync::{Arc, Weak};

use super::{CallbackRegistry, SubscriptionId};

/// Handle to an active subscription.
///
/// Dropping the handle unsubscribes the handler, so a subscription never
/// outlives the value that owns its handle, whichever way that value goes
/// out of scope. Call [`detach`](Self::detach) to keep the handler
/// registered and manage it by ID instead.
///
/// The handle holds only a weak reference to the registry: it does not keep
/// the bus alive, and unsubscribing after the bus is gone is a no-op.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    id: SubscriptionId,
    registry: Option<Weak<CallbackRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, registry: &Arc<CallbackRegistry>) -> Self {
        Self {
            id,
            registry: Some(Arc::downgrade(registry)),
        }
    }

    /// Returns the subscription ID.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns `true` while the handler is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.contains(self.id))
    }

    /// Unsubscribes the handler.
    ///
    /// Returns `true` if this call removed the handler. Calling it again, or
    /// after the bus was dropped, returns `false`.
    pub fn unsubscribe(&self) -> bool {
        let removed = self
            .registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.unsubscribe(self.id));
        if removed {
            tracing::trace!(subscription = %self.id, "Subscription released");
        }
        removed
    }

    /// Releases the handle without unsubscribing.
    ///
    /// The handler stays registered until it is removed by ID through the
    /// bus.
    pub fn detach(mut self) -> SubscriptionId {
        self.registry = None;
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("detached", &self.registry.is_none())
            .finish()
    }
}
