// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bridge wiring all sync components together.

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::event::{EventBus, SwitchEvent};
use crate::hub::HubClient;
use crate::server::{self, ServerState};
use crate::state::{SharedStateStore, Snapshot};
use crate::switch::SwitchHandle;
use crate::sync::Dispatcher;

/// Bidirectional state bridge between local switches and the hub.
///
/// Owns the shared state store, the hub client, the outbound dispatcher
/// and one [`SwitchHandle`] per configured device. The inbound receiver is
/// started with [`serve`](Bridge::serve) (or [`run`](Bridge::run)).
///
/// # Examples
///
/// ```no_run
/// use hubsync::{Bridge, BridgeConfig};
///
/// #[tokio::main]
/// async fn main() -> hubsync::Result<()> {
///     let bridge = Bridge::new(BridgeConfig::new("192.168.1.50", 3))?;
///
///     // Host framework drives switches through their handles
///     bridge.switch(0)?.set_on(true)?;
///
///     // Runs the inbound receiver for the process lifetime
///     bridge.run().await
/// }
/// ```
#[derive(Debug)]
pub struct Bridge {
    config: BridgeConfig,
    store: SharedStateStore,
    events: EventBus,
    hub: HubClient,
    switches: Vec<SwitchHandle>,
}

impl Bridge {
    /// Creates a bridge from the given configuration.
    ///
    /// All switches start off until an inbound push, a startup seed, or a
    /// local actor says otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the hub client
    /// cannot be created.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        config.validate().map_err(crate::error::Error::Config)?;

        let store = SharedStateStore::new(config.device_count());
        let events = EventBus::new();
        let hub = HubClient::new(config.hub_base_url(), config.hub_timeout())?;
        let dispatcher = Dispatcher::new(store.clone(), hub.clone(), config.debounce());

        let switches = (0..config.device_count())
            .map(|index| SwitchHandle::new(index, store.clone(), dispatcher.clone()))
            .collect();

        tracing::info!(
            hub = %hub.base_url(),
            devices = config.device_count(),
            "bridge initialized"
        );

        Ok(Self {
            config,
            store,
            events,
            hub,
            switches,
        })
    }

    /// Returns the bridge configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the handle for the switch at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// for an unknown index.
    pub fn switch(&self, index: usize) -> Result<&SwitchHandle> {
        self.switches
            .get(index)
            .ok_or(crate::error::Error::IndexOutOfRange {
                index,
                count: self.switches.len(),
            })
    }

    /// Returns all switch handles in index order.
    #[must_use]
    pub fn switches(&self) -> &[SwitchHandle] {
        &self.switches
    }

    /// Subscribes to change events produced by inbound hub pushes.
    ///
    /// The host accessory framework listens here to reflect hub-driven
    /// changes on its characteristics.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SwitchEvent> {
        self.events.subscribe()
    }

    /// Computes the current snapshot of all switch states.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Seeds local state with a one-time pull from the hub.
    ///
    /// Changed switches are announced on the event bus like an inbound
    /// push. A transport or parse failure here is a startup fault: the
    /// error is returned and no state is defaulted silently.
    ///
    /// # Errors
    ///
    /// Returns an error if the pull fails or the body does not parse as a
    /// length-matching state vector.
    pub async fn seed(&self) -> Result<()> {
        let snapshot = self.hub.get_status(self.store.len()).await?;
        let changed = self.store.apply_snapshot(&snapshot)?;

        tracing::info!(snapshot = %snapshot, "seeded state from hub");

        for (index, is_on) in changed {
            self.events.publish(SwitchEvent { index, is_on });
        }
        Ok(())
    }

    /// Binds the inbound listener on the configured local port.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound.
    pub async fn bind(&self) -> Result<TcpListener> {
        Ok(server::bind(self.config.local_port()).await?)
    }

    /// Serves the inbound receiver on an already-bound listener.
    ///
    /// Runs until the server fails; normally for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if the server terminates abnormally.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let state = ServerState {
            store: self.store.clone(),
            events: self.events.clone(),
        };
        Ok(server::serve(listener, state).await?)
    }

    /// Runs the bridge: optional startup seed, then the inbound receiver.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails (when enabled), the local port
    /// cannot be bound, or the server terminates abnormally.
    pub async fn run(&self) -> Result<()> {
        if self.config.seed_from_hub() {
            self.seed().await?;
        }
        let listener = self.bind().await?;
        self.serve(listener).await
    }
}
