// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for notifications.
//!
//! # Overview
//!
//! The subscription system consists of:
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription
//! - [`Subscription`] - A scoped handle that unsubscribes when dropped
//! - [`CallbackRegistry`] - Ordered registry that stores and dispatches callbacks
//! - [`Subscribable`] - Trait with typed per-notification subscription helpers
//!
//! # Usage
//!
//! ```
//! use scanbus::event::{NotificationBus, ScannerEvent};
//! use scanbus::subscription::Subscribable;
//! use scanbus::types::Serial;
//!
//! let bus = NotificationBus::new();
//!
//! // Subscribe to selection changes
//! let sub = bus.on_scanner_selection_changed(|serial| {
//!     println!("now showing {serial}");
//! });
//!
//! bus.publish(ScannerEvent::selection_changed(Serial::new("CUS-1").unwrap()));
//!
//! // Later, unsubscribe (dropping `sub` does the same)
//! sub.unsubscribe();
//! ```

mod callback;
mod guard;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use guard::Subscription;
pub use subscribable::Subscribable;
