// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the light-controller hub.
//!
//! The hub exposes two endpoints:
//!
//! - `POST /set_status` taking the snapshot bitstring (`"101"`) as a plain
//!   ASCII body,
//! - `GET /get_status` answering `{"st": [0|1, ...]}`, used once at startup
//!   to seed local state.

use std::time::Duration;

use reqwest::Client;

use crate::error::{Error, ParseError, ProtocolError};
use crate::state::{Snapshot, StateVector};

/// HTTP client for the hub's status endpoints.
///
/// # Examples
///
/// ```no_run
/// use hubsync::hub::HubClient;
/// use hubsync::Snapshot;
/// use std::time::Duration;
///
/// # async fn example() -> hubsync::Result<()> {
/// let client = HubClient::new("192.168.1.50", Duration::from_secs(10))?;
/// client.set_status(&Snapshot::from_bits(vec![true, false])).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HubClient {
    base_url: String,
    client: Client,
}

impl HubClient {
    /// Creates a new client for the hub at `base_url`.
    ///
    /// A scheme-less address is treated as plain HTTP. The timeout bounds
    /// every request; a hung hub connection can therefore stall an outbound
    /// dispatch cycle for at most this long.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProtocolError> {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{base_url}")
        };
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self { base_url, client })
    }

    /// Returns the hub base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pushes a snapshot to the hub's `set_status` endpoint.
    ///
    /// The body is the snapshot bitstring, not JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status code.
    pub async fn set_status(&self, snapshot: &Snapshot) -> Result<(), ProtocolError> {
        let url = format!("{}/set_status", self.base_url);
        let body = snapshot.to_string();

        tracing::debug!(url = %url, body = %body, "pushing status to hub");

        let response = self
            .client
            .post(&url)
            .body(body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(ProtocolError::RequestFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(())
    }

    /// Pulls the current state vector from the hub's `get_status` endpoint.
    ///
    /// # Arguments
    ///
    /// * `expected_len` - The configured device count the vector must match
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status code, or
    /// a body that does not parse as a length-matching `{"st": [0|1, ...]}`.
    pub async fn get_status(&self, expected_len: usize) -> Result<Snapshot, Error> {
        let url = format!("{}/get_status", self.base_url);

        tracing::debug!(url = %url, "pulling status from hub");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(ProtocolError::RequestFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "received hub status");

        let vector: StateVector = serde_json::from_str(&body).map_err(ParseError::Json)?;
        let snapshot = Snapshot::from_vector(&vector.st, expected_len)?;
        Ok(snapshot)
    }
}
