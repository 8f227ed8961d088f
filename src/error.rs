//! Error types for tola-reconcile.
//!
//! The differ itself never fails. Errors come from the collaborators around
//! it: key validation and the [`Mirror`](crate::mirror::Mirror) consumer.

use thiserror::Error;

/// Errors that can occur while validating or applying a delta stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Two items of one sequence share a key
    #[error("duplicate key `{key}` at indices {first} and {second}")]
    DuplicateKey {
        /// The repeated key, rendered for display
        key: String,
        /// Index of the first occurrence
        first: usize,
        /// Index of the repeated occurrence
        second: usize,
    },

    /// A delta referenced an old item the mirror no longer holds
    #[error("old item {old_idx} is no longer held by the mirror")]
    MissingOld {
        /// Index of the old item in the old sequence
        old_idx: usize,
    },

    /// A delta referenced an index past the end of its sequence
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange {
        /// The offending index
        index: usize,
        /// Length of the sequence it was checked against
        len: usize,
    },

    /// Old items were left behind after the whole stream was applied
    #[error("{count} old item(s) were never consumed by the delta stream")]
    Unresolved {
        /// Number of old items still held by the mirror
        count: usize,
    },
}

/// Result type alias for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

impl ReconcileError {
    /// Create a duplicate key error from any displayable key.
    pub fn duplicate_key(key: impl std::fmt::Display, first: usize, second: usize) -> Self {
        Self::DuplicateKey {
            key: key.to_string(),
            first,
            second,
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}
