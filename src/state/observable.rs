// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observable value with a list of change observers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Identifier returned by [`Observable::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Obs({})", self.0)
    }
}

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    value: RwLock<T>,
    observers: RwLock<Vec<(ObserverId, Observer<T>)>>,
    next_id: AtomicU64,
}

/// A value plus the observers to run whenever it changes.
///
/// Observers run synchronously after each mutation, in registration order,
/// with a snapshot of the new value. No lock is held while they run, so an
/// observer may read the value or mutate other observables.
///
/// Clones share the same value and observers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// use scanbus::state::Observable;
///
/// let count = Observable::new(0u32);
/// let renders = Arc::new(AtomicU32::new(0));
///
/// let renders_clone = renders.clone();
/// count.observe(move |_value| {
///     renders_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// count.set(1);
/// // `update` only notifies when the closure reports a change.
/// count.update(|value| {
///     if *value == 1 {
///         return false;
///     }
///     *value = 1;
///     true
/// });
///
/// assert_eq!(count.get(), 1);
/// assert_eq!(renders.load(Ordering::SeqCst), 1);
/// ```
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(value),
                observers: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.value.read().clone()
    }

    /// Runs `f` with a reference to the current value.
    ///
    /// The value stays read-locked while `f` runs: calling [`set`](Self::set)
    /// or [`update`](Self::update) on the same observable from inside `f`
    /// deadlocks. Use [`get`](Self::get) for a copy instead.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.read())
    }

    /// Replaces the value and notifies observers.
    pub fn set(&self, value: T) {
        *self.shared.value.write() = value;
        self.notify();
    }

    /// Mutates the value in place.
    ///
    /// `f` returns whether it changed anything; observers are notified only
    /// if it did. Returns the result of `f`.
    pub fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = f(&mut self.shared.value.write());
        if changed {
            self.notify();
        }
        changed
    }

    /// Registers an observer for future changes.
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut observers = self.shared.observers.write();
        let id = ObserverId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        observers.push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Returns `true` if it was registered.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut observers = self.shared.observers.write();
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.shared.observers.read().len()
    }

    fn notify(&self) {
        let snapshot = self.get();
        let observers: Vec<Observer<T>> = self
            .shared
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&snapshot);
        }
    }
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Replaces the value and notifies observers only if it differs.
    ///
    /// Returns `true` if the value changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        self.update(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        })
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.shared.value.read())
            .field("observers", &self.shared.observers.read().len())
            .finish()
    }
}
