// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound HTTP receiver for hub-pushed state.
//!
//! The hub pushes full state vectors to `POST /setStatus` with a body of
//! `{"st": [0|1, ...]}`. The endpoint is fire-and-forget from the hub's
//! perspective: every request, on every path, is answered with
//! `204 No Content` and an empty body. Malformed payloads are swallowed
//! without mutating any state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use crate::error::ProtocolError;
use crate::event::{EventBus, SwitchEvent};
use crate::state::{SharedStateStore, Snapshot, StateVector};

/// Shared state for the inbound handlers.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Switch state cache the hub pushes into.
    pub store: SharedStateStore,
    /// Bus notified for each switch that actually changed.
    pub events: EventBus,
}

/// Builds the inbound router.
#[must_use]
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/setStatus", post(set_status))
        .fallback(accept_and_ignore)
        .with_state(Arc::new(state))
}

/// Binds the inbound listener on the given port (all interfaces).
///
/// # Errors
///
/// Returns an error if the port cannot be bound.
pub async fn bind(port: u16) -> Result<TcpListener, ProtocolError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.map_err(ProtocolError::Io)?;
    tracing::info!(addr = %addr, "inbound listener bound");
    Ok(listener)
}

/// Serves the inbound router on an already-bound listener.
///
/// Runs until the server fails; normally it runs for the process lifetime.
///
/// # Errors
///
/// Returns an error if the server terminates abnormally.
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<(), ProtocolError> {
    let router = build_router(state);
    axum::serve(listener, router)
        .await
        .map_err(ProtocolError::Io)?;
    Ok(())
}

/// `POST /setStatus` - apply a full state vector pushed by the hub.
///
/// The body is taken as raw bytes so that even a non-UTF-8 payload is
/// swallowed like any other malformed one, keeping the unconditional 204.
async fn set_status(State(state): State<Arc<ServerState>>, body: Bytes) -> StatusCode {
    match std::str::from_utf8(&body) {
        Ok(body) => apply_push(&state, body),
        Err(err) => {
            tracing::debug!(error = %err, "ignoring non-UTF-8 inbound payload");
        }
    }
    StatusCode::NO_CONTENT
}

/// Catch-all for every other path and method.
async fn accept_and_ignore() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Parses and applies a pushed state vector.
///
/// Malformed bodies (bad JSON, wrong length, non-binary entries) are
/// deliberately swallowed: the HTTP contract does not expose validation
/// errors to the hub. Nothing is mutated or forwarded in that case.
fn apply_push(state: &ServerState, body: &str) {
    let vector: StateVector = match serde_json::from_str(body) {
        Ok(vector) => vector,
        Err(err) => {
            tracing::debug!(error = %err, "ignoring malformed inbound payload");
            return;
        }
    };

    let snapshot = match Snapshot::from_vector(&vector.st, state.store.len()) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::debug!(error = %err, "ignoring inbound payload with bad shape");
            return;
        }
    };

    // Length was validated above, so apply cannot fail
    let Ok(changed) = state.store.apply_snapshot(&snapshot) else {
        return;
    };

    for (index, is_on) in changed {
        tracing::debug!(index, is_on, "inbound push changed switch");
        state.events.publish(SwitchEvent { index, is_on });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_state(count: usize) -> ServerState {
        ServerState {
            store: SharedStateStore::new(count),
            events: EventBus::new(),
        }
    }

    #[test]
    fn apply_push_sets_all_indices() {
        let state = server_state(3);
        apply_push(&state, r#"{"st": [1, 0, 1]}"#);
        assert_eq!(state.store.snapshot().to_string(), "101");
    }

    #[test]
    fn apply_push_ignores_malformed_json() {
        let state = server_state(3);
        apply_push(&state, "not json");
        assert_eq!(state.store.snapshot().to_string(), "000");
    }

    #[test]
    fn apply_push_ignores_wrong_length() {
        let state = server_state(3);
        apply_push(&state, r#"{"st": [1, 1]}"#);
        assert_eq!(state.store.snapshot().to_string(), "000");
    }

    #[test]
    fn apply_push_ignores_non_binary_entries() {
        let state = server_state(2);
        apply_push(&state, r#"{"st": [1, 5]}"#);
        assert_eq!(state.store.snapshot().to_string(), "00");
    }

    #[tokio::test]
    async fn apply_push_publishes_only_actual_changes() {
        let state = server_state(3);
        state.store.set(0, true).unwrap();
        let mut rx = state.events.subscribe();

        // Index 0 is already on; only index 2 changes
        apply_push(&state, r#"{"st": [1, 0, 1]}"#);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.index, 2);
        assert!(event.is_on);
        assert!(rx.try_recv().is_err());
    }
}
