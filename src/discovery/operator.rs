// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialized execution of GATT commands.
//!
//! A BLE stack accepts one outstanding GATT operation per connection.
//! [`CommandQueue`] starts the next command only after the previous one
//! reported completion through [`CommandQueue::command_finished`].

use std::collections::VecDeque;

use parking_lot::Mutex;

type Command = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct QueueState {
    pending: VecDeque<Command>,
    running: bool,
}

/// Queue that runs GATT commands one at a time.
///
/// Commands are started on the thread that enqueues them or that reports
/// completion of the previous command. The internal lock is released before
/// a command runs, so a command may complete synchronously by calling
/// [`command_finished`](Self::command_finished) itself.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use scanbus::discovery::CommandQueue;
///
/// let queue = CommandQueue::new();
/// let started = Arc::new(AtomicUsize::new(0));
///
/// for _ in 0..2 {
///     let started = started.clone();
///     queue.add_command(move || {
///         started.fetch_add(1, Ordering::SeqCst);
///     });
/// }
///
/// // Only the first command has started.
/// assert_eq!(started.load(Ordering::SeqCst), 1);
///
/// queue.command_finished();
/// assert_eq!(started.load(Ordering::SeqCst), 2);
/// ```
#[derive(Default)]
pub struct CommandQueue {
    state: Mutex<QueueState>,
}

impl CommandQueue {
    /// Creates an idle, empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a command, starting it immediately if the queue is idle.
    pub fn add_command<F>(&self, command: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.state.lock().pending.push_back(Box::new(command));
        self.run_next();
    }

    /// Marks the running command as complete and starts the next one.
    pub fn command_finished(&self) {
        self.state.lock().running = false;
        self.run_next();
    }

    /// Drops all pending commands and resets the running flag.
    ///
    /// Used when the connection goes away and outstanding operations will
    /// never complete.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.pending.len();
        state.pending.clear();
        state.running = false;
        if dropped > 0 {
            tracing::debug!(dropped, "Cleared pending GATT commands");
        }
    }

    /// Returns the number of commands waiting to start.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Returns `true` while a command is awaiting completion.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    fn run_next(&self) {
        let command = {
            let mut state = self.state.lock();
            if state.running {
                return;
            }
            let Some(command) = state.pending.pop_front() else {
                return;
            };
            state.running = true;
            command
        };
        command();
    }
}

impl std::fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CommandQueue")
            .field("pending", &state.pending.len())
            .field("running", &state.running)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Box<dyn FnOnce() + Send>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |n: u32| -> Box<dyn FnOnce() + Send> {
            let log = log_clone.clone();
            Box::new(move || log.lock().push(n))
        };
        (log, make)
    }

    #[test]
    fn runs_commands_one_at_a_time_in_order() {
        let queue = CommandQueue::new();
        let (log, make) = recorder();

        queue.add_command(make(1));
        queue.add_command(make(2));
        queue.add_command(make(3));

        assert_eq!(*log.lock(), vec![1]);
        assert!(queue.is_running());
        assert_eq!(queue.pending(), 2);

        queue.command_finished();
        assert_eq!(*log.lock(), vec![1, 2]);

        queue.command_finished();
        queue.command_finished();
        assert_eq!(*log.lock(), vec![1, 2, 3]);
        assert!(!queue.is_running());
    }

    #[test]
    fn synchronous_completion_does_not_deadlock() {
        let queue = Arc::new(CommandQueue::new());
        let (log, make) = recorder();

        for n in 0..3 {
            let queue_clone = queue.clone();
            let record = make(n);
            queue.add_command(move || {
                record();
                queue_clone.command_finished();
            });
        }

        assert_eq!(*log.lock(), vec![0, 1, 2]);
        assert!(!queue.is_running());
    }

    #[test]
    fn clear_drops_pending_and_resets() {
        let queue = CommandQueue::new();
        let (log, make) = recorder();

        queue.add_command(make(1));
        queue.add_command(make(2));
        queue.clear();

        assert_eq!(queue.pending(), 0);
        assert!(!queue.is_running());

        queue.add_command(make(3));
        assert_eq!(*log.lock(), vec![1, 3]);
    }

    #[test]
    fn finished_while_idle_is_harmless() {
        let queue = CommandQueue::new();
        queue.command_finished();
        assert!(!queue.is_running());
    }
}
