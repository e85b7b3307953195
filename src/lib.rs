// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `hubsync` - bidirectional state sync between local switches and an HTTP hub.
//!
//! This library keeps a fixed set of virtual light switches eventually
//! consistent with a single external light-controller hub:
//!
//! - an in-memory per-switch state cache ([`state::StateStore`]),
//! - an inbound HTTP receiver that applies hub-pushed state vectors
//!   (`POST /setStatus`, always answered `204 No Content`),
//! - an outbound dispatcher that pushes locally-driven changes back to the
//!   hub - debounced, strictly serialized, and deduplicated so an unchanged
//!   snapshot never hits the network ([`sync::Dispatcher`]),
//! - a per-switch facade for the host accessory framework
//!   ([`SwitchHandle`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use hubsync::{Bridge, BridgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> hubsync::Result<()> {
//!     let config = BridgeConfig::new("192.168.1.50", 3)
//!         .with_local_port(18081)
//!         .with_seed_from_hub(true);
//!     let bridge = Bridge::new(config)?;
//!
//!     // React to hub-driven changes (e.g. update framework characteristics)
//!     let mut events = bridge.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("switch {} is now {}", event.index, event.is_on);
//!         }
//!     });
//!
//!     // Local actors flip switches through their handles
//!     bridge.switch(0)?.set_on(true)?;
//!
//!     // Seed from the hub (fatal on failure) and serve /setStatus
//!     bridge.run().await
//! }
//! ```

mod bridge;
mod config;
pub mod error;
pub mod event;
pub mod hub;
pub mod server;
pub mod state;
pub mod switch;
pub mod sync;

pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result};
pub use event::{EventBus, SwitchEvent};
pub use state::{DeviceState, SharedStateStore, Snapshot};
pub use switch::SwitchHandle;
pub use sync::{CycleOutcome, Dispatcher};
