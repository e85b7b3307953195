// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Debounced, serialized, deduplicated pushes of local state to the hub.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::hub::HubClient;
use crate::state::{SharedStateStore, Snapshot};

/// Result of one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The snapshot differed from the last sent one and was pushed.
    Sent(Snapshot),
    /// The snapshot matched the last sent one; no network call was made.
    Unchanged,
    /// The push failed; the last-sent marker was left untouched so the
    /// next cycle retries.
    Failed(Snapshot),
}

/// Propagates locally-originated state changes to the hub.
///
/// Every [`trigger`](Dispatcher::trigger) schedules one dispatch cycle
/// after a fixed debounce delay. A cycle acquires the dispatcher's single
/// long-lived async mutex, computes the current [`Snapshot`], compares it
/// against the last sent one and POSTs only on change. The mutex is held
/// for the full span of snapshot-compute plus network call, so at most one
/// outbound push is ever in flight and each push observes a coherent
/// snapshot.
///
/// Rapid local changes coalesce naturally: each one schedules its own
/// cycle, the first cycle to run sends the combined snapshot and the
/// remaining cycles find it unchanged and stay silent.
///
/// The last-sent marker starts out empty, so the first cycle after startup
/// always pushes. It is only advanced when a push succeeds; a failed push
/// is logged and retried by the next trigger.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: SharedStateStore,
    hub: HubClient,
    debounce: Duration,
    last_sent: Mutex<Option<Snapshot>>,
}

impl Dispatcher {
    /// Creates a dispatcher over the shared store and hub client.
    #[must_use]
    pub fn new(store: SharedStateStore, hub: HubClient, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                hub,
                debounce,
                last_sent: Mutex::new(None),
            }),
        }
    }

    /// Returns the configured debounce delay.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.inner.debounce
    }

    /// Schedules one debounced dispatch cycle.
    ///
    /// Fire-and-forget: the caller gets control back immediately and the
    /// cycle runs on the tokio runtime after the debounce delay. The
    /// outcome is not reported to the caller; failures are logged.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn trigger(&self) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            inner.run_cycle().await;
        });
    }

    /// Runs one dispatch cycle immediately, without debounce.
    ///
    /// Exposed for callers that need to observe the outcome; the bridge's
    /// normal path is [`trigger`](Dispatcher::trigger).
    pub async fn dispatch_now(&self) -> CycleOutcome {
        self.inner.run_cycle().await
    }
}

impl Inner {
    /// One reconcile-and-push cycle under the exclusive lock.
    async fn run_cycle(&self) -> CycleOutcome {
        let mut last_sent = self.last_sent.lock().await;

        let current = self.store.snapshot();
        if last_sent.as_ref() == Some(&current) {
            tracing::debug!(snapshot = %current, "snapshot unchanged, skipping push");
            return CycleOutcome::Unchanged;
        }

        match self.hub.set_status(&current).await {
            Ok(()) => {
                tracing::debug!(snapshot = %current, "pushed status to hub");
                *last_sent = Some(current.clone());
                CycleOutcome::Sent(current)
            }
            Err(err) => {
                tracing::error!(
                    hub = %self.hub.base_url(),
                    error = %err,
                    "failed to push status to hub"
                );
                CycleOutcome::Failed(current)
            }
        }
    }
}
