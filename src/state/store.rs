// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered, fixed-size table of per-switch states.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};

use super::Snapshot;

/// State of a single switch.
///
/// The index is assigned at construction (0-based, dense) and is stable for
/// the process lifetime; entries are never reordered or reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    index: usize,
    is_on: bool,
}

impl DeviceState {
    /// Returns the stable switch index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the cached on/off state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }
}

/// Ordered table of all switch states, indexed `0..count`.
///
/// The store performs no I/O and is not synchronized itself; use
/// [`SharedStateStore`] when it is accessed from concurrent tasks.
///
/// # Examples
///
/// ```
/// use hubsync::state::StateStore;
///
/// let mut store = StateStore::new(3);
/// assert!(store.set(1, true).unwrap());
/// assert!(store.get(1).unwrap());
/// assert_eq!(store.snapshot().to_string(), "010");
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    devices: Vec<DeviceState>,
}

impl StateStore {
    /// Creates a store for `count` switches, all initially off.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let devices = (0..count)
            .map(|index| DeviceState {
                index,
                is_on: false,
            })
            .collect();
        Self { devices }
    }

    /// Returns the number of switches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if the store holds no switches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns the cached state of the switch at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a configured
    /// switch.
    pub fn get(&self, index: usize) -> Result<bool> {
        self.devices
            .get(index)
            .map(DeviceState::is_on)
            .ok_or(Error::IndexOutOfRange {
                index,
                count: self.devices.len(),
            })
    }

    /// Sets the state of the switch at `index`.
    ///
    /// Returns whether the stored value actually differed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a configured
    /// switch.
    pub fn set(&mut self, index: usize, is_on: bool) -> Result<bool> {
        let count = self.devices.len();
        let device = self
            .devices
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, count })?;

        let changed = device.is_on != is_on;
        device.is_on = is_on;
        Ok(changed)
    }

    /// Computes the snapshot of all switch states in index order.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_bits(self.devices.iter().map(DeviceState::is_on).collect())
    }

    /// Applies a full state snapshot, returning `(index, is_on)` for each
    /// switch whose state actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the snapshot length differs
    /// from the store size; no state is mutated in that case.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> Result<Vec<(usize, bool)>> {
        if snapshot.len() != self.devices.len() {
            return Err(Error::IndexOutOfRange {
                index: snapshot.len(),
                count: self.devices.len(),
            });
        }

        let mut changed = Vec::new();
        for (index, &is_on) in snapshot.bits().iter().enumerate() {
            if self.set(index, is_on)? {
                changed.push((index, is_on));
            }
        }
        Ok(changed)
    }
}

/// Thread-safe handle to a [`StateStore`].
///
/// The tokio runtime schedules the inbound handler and dispatch cycles on
/// parallel worker threads, so the store is guarded by a `parking_lot`
/// read-write lock. The lock is only held for in-memory operations, never
/// across await points.
#[derive(Debug, Clone)]
pub struct SharedStateStore {
    inner: Arc<RwLock<StateStore>>,
}

impl SharedStateStore {
    /// Creates a shared store for `count` switches, all initially off.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StateStore::new(count))),
        }
    }

    /// Returns the number of switches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the store holds no switches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the cached state of the switch at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] for an unknown index.
    pub fn get(&self, index: usize) -> Result<bool> {
        self.inner.read().get(index)
    }

    /// Sets the state of the switch at `index`, returning whether the
    /// stored value actually differed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] for an unknown index.
    pub fn set(&self, index: usize, is_on: bool) -> Result<bool> {
        self.inner.write().set(index, is_on)
    }

    /// Computes the snapshot of all switch states in index order.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().snapshot()
    }

    /// Applies a full state snapshot, returning the changed indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] on a length mismatch.
    pub fn apply_snapshot(&self, snapshot: &Snapshot) -> Result<Vec<(usize, bool)>> {
        self.inner.write().apply_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_starts_all_off() {
        let store = StateStore::new(3);
        assert_eq!(store.len(), 3);
        for index in 0..3 {
            assert!(!store.get(index).unwrap());
        }
        assert_eq!(store.snapshot().to_string(), "000");
    }

    #[test]
    fn set_reports_whether_value_changed() {
        let mut store = StateStore::new(2);

        assert!(store.set(0, true).unwrap());
        // Same value again is not a change
        assert!(!store.set(0, true).unwrap());
        assert!(store.set(0, false).unwrap());
    }

    #[test]
    fn get_out_of_range_is_an_error() {
        let store = StateStore::new(2);
        let err = store.get(2).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 2, count: 2 }));
    }

    #[test]
    fn set_out_of_range_is_an_error() {
        let mut store = StateStore::new(2);
        let err = store.set(5, true).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 5, count: 2 }));
    }

    #[test]
    fn snapshot_reflects_index_order() {
        let mut store = StateStore::new(4);
        store.set(0, true).unwrap();
        store.set(3, true).unwrap();
        assert_eq!(store.snapshot().to_string(), "1001");
    }

    #[test]
    fn apply_snapshot_returns_only_changes() {
        let mut store = StateStore::new(3);
        store.set(0, true).unwrap();

        let incoming = Snapshot::from_bits(vec![true, false, true]);
        let changed = store.apply_snapshot(&incoming).unwrap();

        // Index 0 was already on, index 1 already off
        assert_eq!(changed, vec![(2, true)]);
        assert_eq!(store.snapshot(), incoming);
    }

    #[test]
    fn apply_snapshot_rejects_length_mismatch() {
        let mut store = StateStore::new(3);
        let incoming = Snapshot::from_bits(vec![true, false]);
        assert!(store.apply_snapshot(&incoming).is_err());
        // Nothing was mutated
        assert_eq!(store.snapshot().to_string(), "000");
    }

    #[test]
    fn shared_store_clones_observe_same_state() {
        let store = SharedStateStore::new(2);
        let other = store.clone();

        store.set(1, true).unwrap();
        assert!(other.get(1).unwrap());
        assert_eq!(other.snapshot().to_string(), "01");
    }
}
