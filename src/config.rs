// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a [`Bridge`](crate::Bridge).
///
/// Holds the hub base URL, the inbound listener port, the fixed number of
/// devices and the timing knobs of the outbound dispatcher.
///
/// # Examples
///
/// ```
/// use hubsync::BridgeConfig;
/// use std::time::Duration;
///
/// // Minimal configuration: hub address and device count
/// let config = BridgeConfig::new("192.168.1.50", 3);
///
/// // With all options
/// let config = BridgeConfig::new("192.168.1.50", 3)
///     .with_local_port(18081)
///     .with_debounce(Duration::from_millis(50))
///     .with_hub_timeout(Duration::from_secs(5))
///     .with_seed_from_hub(true);
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    hub_url: String,
    device_count: usize,
    local_port: u16,
    debounce: Duration,
    hub_timeout: Duration,
    seed_from_hub: bool,
}

impl BridgeConfig {
    /// Default inbound listener port.
    pub const DEFAULT_LOCAL_PORT: u16 = 18081;
    /// Default debounce delay before an outbound dispatch cycle.
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(20);
    /// Default timeout for outbound hub requests.
    pub const DEFAULT_HUB_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified hub and device count.
    ///
    /// # Arguments
    ///
    /// * `hub_url` - Hostname, IP address or full base URL of the hub
    /// * `device_count` - Fixed number of switches, assigned indices 0..count
    #[must_use]
    pub fn new(hub_url: impl Into<String>, device_count: usize) -> Self {
        Self {
            hub_url: hub_url.into(),
            device_count,
            local_port: Self::DEFAULT_LOCAL_PORT,
            debounce: Self::DEFAULT_DEBOUNCE,
            hub_timeout: Self::DEFAULT_HUB_TIMEOUT,
            seed_from_hub: false,
        }
    }

    /// Sets the inbound listener port.
    #[must_use]
    pub fn with_local_port(mut self, port: u16) -> Self {
        self.local_port = port;
        self
    }

    /// Sets the debounce delay applied before each outbound dispatch cycle.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the timeout for outbound hub requests.
    #[must_use]
    pub fn with_hub_timeout(mut self, timeout: Duration) -> Self {
        self.hub_timeout = timeout;
        self
    }

    /// Enables or disables the one-time startup pull of hub state.
    ///
    /// When enabled, [`Bridge::seed`](crate::Bridge::seed) must succeed
    /// before the bridge is used; a failed pull is a startup error.
    #[must_use]
    pub fn with_seed_from_hub(mut self, seed: bool) -> Self {
        self.seed_from_hub = seed;
        self
    }

    /// Returns the hub base URL as configured.
    #[must_use]
    pub fn hub_url(&self) -> &str {
        &self.hub_url
    }

    /// Returns the configured device count.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.device_count
    }

    /// Returns the inbound listener port.
    #[must_use]
    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    /// Returns the debounce delay.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Returns the outbound request timeout.
    #[must_use]
    pub fn hub_timeout(&self) -> Duration {
        self.hub_timeout
    }

    /// Returns whether startup seeding from the hub is enabled.
    #[must_use]
    pub fn seed_from_hub(&self) -> bool {
        self.seed_from_hub
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the device count is zero or the hub URL is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_count == 0 {
            return Err(ConfigError::NoDevices);
        }
        if self.hub_url.trim().is_empty() {
            return Err(ConfigError::InvalidHubUrl("empty URL".to_string()));
        }
        Ok(())
    }

    /// Builds the normalized hub base URL.
    ///
    /// Prepends `http://` when no scheme is present and strips any trailing
    /// slash so endpoint paths can be appended directly.
    #[must_use]
    pub fn hub_base_url(&self) -> String {
        let url = if self.hub_url.starts_with("http://") || self.hub_url.starts_with("https://") {
            self.hub_url.clone()
        } else {
            format!("http://{}", self.hub_url)
        };
        url.trim_end_matches('/').to_string()
    }
}
