// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud-side scanner metadata.
//!
//! The cloud service lists the scanners an OEM token may use, with the
//! certificate issued for each. Records are fed into the notification bus as
//! `cloud-record-received` notifications.
//!
//! The HTTP client requires the `cloud` feature (enabled by default).

#[cfg(feature = "cloud")]
mod client;
mod device_list;

#[cfg(feature = "cloud")]
pub use client::{CloudClient, CloudConfig};
pub use device_list::parse_device_list;

use crate::error::Result;
use crate::event::{EventSender, ScannerEvent};
use crate::types::ScannerCloud;

/// Posts one `cloud-record-received` notification per record.
///
/// Returns the number of notifications posted.
///
/// # Errors
///
/// Returns `ProtocolError::ChannelClosed` if the event queue is gone.
pub fn publish_records(
    sender: &EventSender,
    records: impl IntoIterator<Item = ScannerCloud>,
) -> Result<usize> {
    let mut posted = 0;
    for record in records {
        sender.post(ScannerEvent::cloud_record_received(record))?;
        posted += 1;
    }
    Ok(posted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventQueue, NotificationBus};
    use crate::types::Serial;

    #[test]
    fn publish_records_posts_each_record() {
        let mut queue = EventQueue::new(NotificationBus::new());
        let records = ["CUS-1", "CUS-2"]
            .into_iter()
            .map(|s| ScannerCloud::new(Serial::new(s).unwrap()));

        assert_eq!(publish_records(&queue.sender(), records).unwrap(), 2);
        assert_eq!(queue.pending(), 2);
        assert_eq!(queue.drain(), 2);
    }
}
