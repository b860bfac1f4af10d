//! Checkpoint - Save/Load Generator State
//!
//! A snapshot records the seed and the exact stream position, so a suite can
//! persist a generator mid-run and resume the same sequence later.

use crate::generator::KaosKo;
use crate::rng::{StreamState, SubtractiveRng, STATE_LEN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid stream state: {0}")]
    InvalidState(String),

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Complete generator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSnapshot {
    /// Seed the generator was built with
    pub seed: i32,

    /// Stream position at time of snapshot
    pub stream: StreamState,
}

impl GeneratorSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl KaosKo {
    /// Capture seed and stream position
    ///
    /// # Example
    /// ```
    /// use kaosko::KaosKo;
    ///
    /// let mut original = KaosKo::new("resumes_run");
    /// original.int();
    ///
    /// let mut resumed = KaosKo::restore(&original.snapshot()).unwrap();
    /// assert_eq!(original.int(), resumed.int());
    /// ```
    pub fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot {
            seed: self.seed,
            stream: self.rng.state(),
        }
    }

    /// Rebuild a generator that continues from a snapshot
    ///
    /// # Errors
    /// [`SnapshotError::InvalidState`] when the stream table does not hold
    /// exactly 56 entries, a cursor points outside it, or an entry lies
    /// outside `[0, i32::MAX)`.
    pub fn restore(snapshot: &GeneratorSnapshot) -> Result<Self, SnapshotError> {
        let rng = SubtractiveRng::from_state(&snapshot.stream).ok_or_else(|| {
            SnapshotError::InvalidState(format!(
                "expected {} table entries in [0, i32::MAX) with cursors below {}, got {} entries (inext {}, inextp {})",
                STATE_LEN,
                STATE_LEN,
                snapshot.stream.table.len(),
                snapshot.stream.inext,
                snapshot.stream.inextp
            ))
        })?;

        tracing::debug!(seed = snapshot.seed, "restored fixture generator");
        Ok(Self {
            seed: snapshot.seed,
            rng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_rejects_truncated_table() {
        let mut snapshot = KaosKo::with_seed(1).snapshot();
        snapshot.stream.table.pop();
        let err = KaosKo::restore(&snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidState(_)));
    }

    #[test]
    fn test_restore_rejects_out_of_range_table_entry() {
        let mut snapshot = KaosKo::with_seed(1).snapshot();
        snapshot.stream.table[1] = 0;
        snapshot.stream.table[22] = i32::MIN;
        let err = KaosKo::restore(&snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidState(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = GeneratorSnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Serialization(_)));
    }
}
