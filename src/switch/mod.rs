// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-switch facade for local actors.
//!
//! A [`SwitchHandle`] is what the host accessory framework drives: its
//! `set` hook calls [`set_on`](SwitchHandle::set_on), its `get` hook calls
//! [`is_on`](SwitchHandle::is_on). This is the only seam between the sync
//! core and the framework on the locally-driven path.

use crate::error::Result;
use crate::state::SharedStateStore;
use crate::sync::Dispatcher;

/// Facade over one switch's on/off state.
///
/// `set_on` writes the shared store synchronously and schedules a debounced
/// hub push; it reports success immediately without awaiting the dispatch
/// outcome. `is_on` answers from the cache with no network access, so the
/// value may be stale until the next inbound push arrives.
#[derive(Debug, Clone)]
pub struct SwitchHandle {
    index: usize,
    store: SharedStateStore,
    dispatcher: Dispatcher,
}

impl SwitchHandle {
    pub(crate) fn new(index: usize, store: SharedStateStore, dispatcher: Dispatcher) -> Self {
        Self {
            index,
            store,
            dispatcher,
        }
    }

    /// Returns the stable switch index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sets this switch's state and schedules a debounced hub push.
    ///
    /// Returns as soon as the local write completes; the push outcome is
    /// not awaited and failures are only logged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// if the handle's index is not in the store.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, which is needed to
    /// schedule the push.
    pub fn set_on(&self, is_on: bool) -> Result<()> {
        self.store.set(self.index, is_on)?;
        tracing::debug!(index = self.index, is_on, "local actor set switch");
        self.dispatcher.trigger();
        Ok(())
    }

    /// Returns this switch's last cached state.
    ///
    /// No network access; may be stale relative to the physical hub.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// if the handle's index is not in the store.
    pub fn is_on(&self) -> Result<bool> {
        let is_on = self.store.get(self.index)?;
        tracing::debug!(index = self.index, is_on, "local actor read switch");
        Ok(is_on)
    }
}
