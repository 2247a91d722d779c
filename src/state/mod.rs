// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observable state containers.
//!
//! Each container subscribes itself to a [`NotificationBus`] when attached
//! and exposes its state as [`Observable`] values the UI layer can watch.
//! Dropping a container releases its bus subscriptions.
//!
//! - [`SessionModel`] - Selected scanner and the scanner shown in detail
//! - [`BluetoothModel`] - Discovered BLE devices and scan status
//! - [`CloudModel`] - Cloud records per serial
//! - [`ScannersModel`] - Registry of known scanners
//!
//! # Examples
//!
//! ```
//! use scanbus::event::{NotificationBus, ScannerEvent};
//! use scanbus::state::SessionModel;
//! use scanbus::types::Serial;
//!
//! let bus = NotificationBus::new();
//! let session = SessionModel::attach(&bus);
//!
//! bus.publish(ScannerEvent::selection_changed(Serial::new("CUS-0042")?));
//! assert_eq!(session.selected_serial().unwrap().as_str(), "CUS-0042");
//! # Ok::<(), scanbus::ValueError>(())
//! ```
//!
//! [`NotificationBus`]: crate::event::NotificationBus

mod bluetooth;
mod cloud;
mod observable;
mod scanners;
mod session;

pub use bluetooth::{BluetoothModel, ScanStatus};
pub use cloud::CloudModel;
pub use observable::{Observable, ObserverId};
pub use scanners::ScannersModel;
pub use session::SessionModel;
