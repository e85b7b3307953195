// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch state tracking.
//!
//! This module holds the in-memory source of truth for all switches:
//! a fixed-size, index-ordered [`StateStore`] plus the [`Snapshot`]
//! serialization used on the wire and as the outbound dedup key.

mod snapshot;
mod store;

pub use snapshot::{Snapshot, StateVector};
pub use store::{DeviceState, SharedStateStore, StateStore};
