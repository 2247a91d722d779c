// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification system for scanner discovery, connectivity and cloud sync.
//!
//! This module provides the typed publish/subscribe bus that decouples
//! producers of state-changing facts from the state containers that
//! consume them.
//!
//! - [`ScannerEvent`] - The closed set of notifications and their payloads
//! - [`EventKind`] - Payload-free discriminant used to select notifications
//! - [`NotificationBus`] - Synchronous, ordered dispatch to subscribers
//! - [`EventQueue`] / [`EventSender`] - Marshaling from producer threads
//!
//! # Examples
//!
//! ```
//! use scanbus::event::{EventKind, NotificationBus, ScannerEvent};
//! use scanbus::types::Serial;
//!
//! let bus = NotificationBus::new();
//!
//! // Subscribe to one kind of notification
//! let _sub = bus.subscribe(EventKind::ScannerSelectionChanged, |event| {
//!     println!("{} -> {:?}", event.name(), event.serial());
//! });
//!
//! // Publish a notification
//! bus.publish(ScannerEvent::selection_changed(Serial::new("CUS-1").unwrap()));
//! ```

mod dispatcher;
mod notification_bus;
mod scanner_event;

pub use dispatcher::{EventQueue, EventSender};
pub use notification_bus::NotificationBus;
pub use scanner_event::{EventKind, ScannerEvent};
