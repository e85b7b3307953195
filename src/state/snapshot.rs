// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic serialized form of all switch states.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A point-in-time view of all switch states, in index order.
///
/// A snapshot has two serialized forms:
///
/// - the ASCII bitstring (`"101"`) sent to the hub's `set_status` endpoint,
/// - the JSON vector (`[1, 0, 1]`) used by `setStatus` / `get_status`.
///
/// Snapshot equality is the dedup key of the outbound dispatcher: two equal
/// snapshots never produce two pushes.
///
/// # Examples
///
/// ```
/// use hubsync::Snapshot;
///
/// let snapshot = Snapshot::from_bits(vec![true, false, true]);
/// assert_eq!(snapshot.to_string(), "101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    bits: Vec<bool>,
}

impl Snapshot {
    /// Creates a snapshot from a sequence of switch states in index order.
    #[must_use]
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parses a hub state vector of `0|1` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector length differs from `expected_len`
    /// or any entry is neither 0 nor 1.
    pub fn from_vector(values: &[i64], expected_len: usize) -> Result<Self, ParseError> {
        if values.len() != expected_len {
            return Err(ParseError::LengthMismatch {
                expected: expected_len,
                actual: values.len(),
            });
        }

        let mut bits = Vec::with_capacity(values.len());
        for (index, &value) in values.iter().enumerate() {
            match value {
                0 => bits.push(false),
                1 => bits.push(true),
                _ => return Err(ParseError::InvalidEntry { index, value }),
            }
        }

        Ok(Self { bits })
    }

    /// Returns the number of switches in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the snapshot covers no switches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the switch states in index order.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns the JSON vector form (`0|1` per index).
    #[must_use]
    pub fn to_vector(&self) -> Vec<u8> {
        self.bits.iter().map(|&on| u8::from(on)).collect()
    }
}

impl std::fmt::Display for Snapshot {
    /// Formats the snapshot as the hub wire bitstring, e.g. `"101"`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &on in &self.bits {
            f.write_str(if on { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// JSON wire shape shared by the inbound `setStatus` endpoint and the
/// hub's `get_status` response: `{"st": [0, 1, ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateVector {
    /// Per-switch states in index order.
    pub st: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitstring_form_is_index_ordered() {
        let snapshot = Snapshot::from_bits(vec![true, false, true]);
        assert_eq!(snapshot.to_string(), "101");
    }

    #[test]
    fn empty_snapshot_renders_empty() {
        let snapshot = Snapshot::from_bits(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_string(), "");
    }

    #[test]
    fn from_vector_accepts_binary_entries() {
        let snapshot = Snapshot::from_vector(&[1, 0, 1], 3).unwrap();
        assert_eq!(snapshot.bits(), &[true, false, true]);
    }

    #[test]
    fn from_vector_rejects_wrong_length() {
        let err = Snapshot::from_vector(&[1, 0], 3).unwrap_err();
        assert!(matches!(
            err,
            ParseError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn from_vector_rejects_non_binary_entry() {
        let err = Snapshot::from_vector(&[1, 2, 0], 3).unwrap_err();
        assert!(matches!(err, ParseError::InvalidEntry { index: 1, value: 2 }));
    }

    #[test]
    fn equality_is_the_dedup_key() {
        let a = Snapshot::from_bits(vec![true, true]);
        let b = Snapshot::from_vector(&[1, 1], 2).unwrap();
        assert_eq!(a, b);

        let c = Snapshot::from_bits(vec![true, false]);
        assert_ne!(a, c);
    }

    #[test]
    fn to_vector_round_trips() {
        let snapshot = Snapshot::from_bits(vec![false, true, true]);
        assert_eq!(snapshot.to_vector(), vec![0, 1, 1]);
    }

    #[test]
    fn state_vector_parses_wire_json() {
        let parsed: StateVector = serde_json::from_str(r#"{"st": [1, 0, 1]}"#).unwrap();
        assert_eq!(parsed.st, vec![1, 0, 1]);
    }
}
