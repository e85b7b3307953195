// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `hubsync` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! configuration validation, hub communication, and state-vector parsing.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when bridging
/// local switch state with the hub.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during configuration validation.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error occurred while communicating with the hub.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a state vector.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A device index is outside the configured range.
    ///
    /// This signals a configuration or programming error; indices are
    /// never silently wrapped or truncated.
    #[error("device index {index} is out of range (device count is {count})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The configured number of devices.
        count: usize,
    },
}

/// Errors related to bridge configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured device count is zero.
    #[error("device count must be at least 1")]
    NoDevices,

    /// The hub base URL is empty or malformed.
    #[error("invalid hub URL: {0}")]
    InvalidHubUrl(String),
}

/// Errors related to HTTP communication with the hub.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The hub answered with a non-success status.
    #[error("hub request failed: {0}")]
    RequestFailed(String),

    /// The inbound listener could not be bound or failed while serving.
    #[error("inbound server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to parsing hub state vectors.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The state vector does not match the configured device count.
    #[error("state vector has length {actual}, expected {expected}")]
    LengthMismatch {
        /// The configured number of devices.
        expected: usize,
        /// The length of the received vector.
        actual: usize,
    },

    /// A state vector entry is neither 0 nor 1.
    #[error("state vector entry at index {index} is {value}, expected 0 or 1")]
    InvalidEntry {
        /// The index of the invalid entry.
        index: usize,
        /// The value that was received.
        value: i64,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_display() {
        let err = Error::IndexOutOfRange { index: 5, count: 3 };
        assert_eq!(
            err.to_string(),
            "device index 5 is out of range (device count is 3)"
        );
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::NoDevices.into();
        assert!(matches!(err, Error::Config(ConfigError::NoDevices)));
    }

    #[test]
    fn parse_error_length_mismatch_display() {
        let err = ParseError::LengthMismatch {
            expected: 3,
            actual: 5,
        };
        assert_eq!(err.to_string(), "state vector has length 5, expected 3");
    }

    #[test]
    fn parse_error_invalid_entry_display() {
        let err = ParseError::InvalidEntry { index: 2, value: 7 };
        assert_eq!(
            err.to_string(),
            "state vector entry at index 2 is 7, expected 0 or 1"
        );
    }
}
