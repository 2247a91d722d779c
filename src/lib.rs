// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `scanbus` - Typed notifications and state for wireless scanner apps.
//!
//! This library connects the producers of a scanner application (BLE
//! discovery, GATT reads, cloud sync) to the state the UI observes, through
//! a typed publish/subscribe bus.
//!
//! # Notifications
//!
//! | Name | Payload |
//! |------|---------|
//! | `scanner-selection-changed` | serial |
//! | `device-found` | discovered BLE device |
//! | `power-state-changed` | serial, powered flag |
//! | `wifi-info-received` | serial, Wi-Fi info |
//! | `cloud-record-received` | cloud record |
//! | `device-details-requested` | scanner |
//!
//! # Quick Start
//!
//! ## Publishing and Subscribing
//!
//! ```
//! use scanbus::{NotificationBus, ScannerEvent, Subscribable};
//! use scanbus::types::Serial;
//!
//! let bus = NotificationBus::new();
//!
//! // Typed handler, released when `sub` is dropped
//! let sub = bus.on_power_changed(|serial, powered| {
//!     println!("{serial} is now {}", if powered { "on" } else { "off" });
//! });
//!
//! bus.publish(ScannerEvent::power_changed(Serial::new("ABC123")?, true));
//! drop(sub);
//! # Ok::<(), scanbus::ValueError>(())
//! ```
//!
//! ## Application Context
//!
//! [`AppContext`] owns the bus and the four state containers. Producers on
//! other threads post through an [`EventSender`]; the owning thread drains.
//!
//! ```
//! use scanbus::{AppConfig, AppContext, ScannerEvent};
//! use scanbus::types::Serial;
//!
//! let mut app = AppContext::new(AppConfig::default());
//! let serial = Serial::new("CUS-0042")?;
//!
//! app.sender().post(ScannerEvent::power_changed(serial.clone(), true))?;
//! app.drain_events();
//!
//! assert!(app.scanners().scanner(&serial).unwrap().powered);
//! # Ok::<(), scanbus::Error>(())
//! ```
//!
//! ## Cloud Records
//!
//! ```no_run
//! use scanbus::AppContext;
//! use scanbus::cloud::CloudConfig;
//!
//! #[tokio::main]
//! async fn main() -> scanbus::Result<()> {
//!     let mut app = AppContext::default();
//!     let client = CloudConfig::new("https://cloud.example.com", "token").into_client()?;
//!
//!     client.sync(&app.sender()).await?;
//!     app.drain_events();
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cloud;
pub mod discovery;
pub mod error;
pub mod event;
pub mod state;
pub mod subscription;
pub mod types;

pub use app::{AppConfig, AppContext};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{EventKind, EventQueue, EventSender, NotificationBus, ScannerEvent};
pub use subscription::{Subscribable, Subscription, SubscriptionId};
