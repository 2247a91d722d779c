// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Application composition root.
//!
//! [`AppContext`] builds the notification bus, the event queue and the four
//! state containers exactly once and hands them out by reference. There is
//! no global bus; everything that needs one receives it from here.
//!
//! # Examples
//!
//! ```
//! use scanbus::app::{AppConfig, AppContext};
//! use scanbus::discovery::DiscoveredDevice;
//! use scanbus::event::ScannerEvent;
//! use scanbus::types::MacAddress;
//!
//! let mut app = AppContext::new(AppConfig::default());
//!
//! let sender = app.sender();
//! std::thread::spawn(move || {
//!     let device = DiscoveredDevice::new(MacAddress::new([0xA4, 0, 0, 0, 0, 0x10]))
//!         .with_name("CUS-0042");
//!     sender.post(ScannerEvent::device_found(device)).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(app.drain_events(), 1);
//! assert_eq!(app.scanners().len(), 1);
//! assert_eq!(app.bluetooth().device_count(), 1);
//! ```

use crate::discovery::DiscoveryConfig;
use crate::event::{EventQueue, EventSender, NotificationBus};
use crate::state::{BluetoothModel, CloudModel, ScannersModel, SessionModel};

/// Configuration for [`AppContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// How scanners are recognized among discovered devices.
    pub discovery: DiscoveryConfig,
}

impl AppConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the discovery configuration.
    #[must_use]
    pub fn with_discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }
}

/// The bus and state containers of one running application.
#[derive(Debug)]
pub struct AppContext {
    bus: NotificationBus,
    queue: EventQueue,
    session: SessionModel,
    bluetooth: BluetoothModel,
    cloud: CloudModel,
    scanners: ScannersModel,
}

impl AppContext {
    /// Creates the bus and attaches every state container to it.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let bus = NotificationBus::new();
        let queue = EventQueue::new(bus.clone());

        let session = SessionModel::attach(&bus);
        let bluetooth = BluetoothModel::attach(&bus);
        let cloud = CloudModel::attach(&bus);
        let scanners = ScannersModel::attach(&bus, config.discovery);

        tracing::debug!(
            subscribers = bus.subscriber_count(),
            "Application context created"
        );

        Self {
            bus,
            queue,
            session,
            bluetooth,
            cloud,
            scanners,
        }
    }

    /// Returns the notification bus.
    #[must_use]
    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    /// Returns a sender producers on other threads can post through.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.queue.sender()
    }

    /// Publishes every notification posted through a sender so far.
    ///
    /// Call this from the thread that owns the bus.
    pub fn drain_events(&mut self) -> usize {
        self.queue.drain()
    }

    /// Returns the session container.
    #[must_use]
    pub fn session(&self) -> &SessionModel {
        &self.session
    }

    /// Returns the Bluetooth container.
    #[must_use]
    pub fn bluetooth(&self) -> &BluetoothModel {
        &self.bluetooth
    }

    /// Returns the cloud container.
    #[must_use]
    pub fn cloud(&self) -> &CloudModel {
        &self.cloud
    }

    /// Returns the scanner registry.
    #[must_use]
    pub fn scanners(&self) -> &ScannersModel {
        &self.scanners
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
