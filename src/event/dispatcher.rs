// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Marshaling notifications from producer threads onto the bus owner.

use tokio::sync::mpsc;

use super::{NotificationBus, ScannerEvent};
use crate::error::{ProtocolError, Result};

/// Thread-safe handle for posting notifications to an [`EventQueue`].
///
/// Producers running on background threads or tasks (BLE callbacks, cloud
/// requests) post through a sender; the queue owner publishes the
/// notifications on its own thread so handlers never run concurrently.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ScannerEvent>,
}

impl EventSender {
    /// Posts a notification for later publication.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ChannelClosed` if the queue has been dropped.
    pub fn post(&self, event: ScannerEvent) -> Result<()> {
        self.tx.send(event).map_err(|err| {
            tracing::warn!(event = err.0.name(), "Event queue closed, notification dropped");
            ProtocolError::ChannelClosed("event queue".to_string())
        })?;
        Ok(())
    }

    /// Returns `true` if the queue has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// FIFO of notifications waiting to be published on the bus owner thread.
///
/// # Examples
///
/// ```
/// use scanbus::event::{EventQueue, NotificationBus, ScannerEvent};
/// use scanbus::subscription::Subscribable;
/// use scanbus::types::Serial;
///
/// let bus = NotificationBus::new();
/// let mut queue = EventQueue::new(bus.clone());
/// let sender = queue.sender();
///
/// let _sub = bus.on_power_changed(|serial, powered| println!("{serial}: {powered}"));
///
/// std::thread::spawn(move || {
///     let serial = Serial::new("ABC123").unwrap();
///     sender.post(ScannerEvent::power_changed(serial, true)).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// // Back on the owner thread.
/// assert_eq!(queue.drain(), 1);
/// ```
#[derive(Debug)]
pub struct EventQueue {
    bus: NotificationBus,
    tx: mpsc::UnboundedSender<ScannerEvent>,
    rx: mpsc::UnboundedReceiver<ScannerEvent>,
}

impl EventQueue {
    /// Creates an empty queue that publishes onto `bus`.
    #[must_use]
    pub fn new(bus: NotificationBus) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { bus, tx, rx }
    }

    /// Returns a new sender for this queue.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Returns the bus this queue publishes onto.
    #[must_use]
    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    /// Returns the number of notifications waiting to be published.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Publishes every queued notification, in posting order, without
    /// waiting for new ones.
    ///
    /// Returns the number of notifications published.
    pub fn drain(&mut self) -> usize {
        let mut published = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.bus.publish(event);
            published += 1;
        }
        if published > 0 {
            tracing::trace!(published, "Drained event queue");
        }
        published
    }

    /// Publishes notifications as they arrive until every external sender
    /// has been dropped.
    ///
    /// Returns the number of notifications published.
    pub async fn run(self) -> usize {
        let Self { bus, tx, mut rx } = self;
        // Only external senders keep the loop alive.
        drop(tx);

        let mut published = 0;
        while let Some(event) = rx.recv().await {
            bus.publish(event);
            published += 1;
        }
        tracing::debug!(published, "Event queue closed");
        published
    }
}
