//! KEM error type.
//!
//! Only input validation and the random source can fail. Decapsulation of a
//! mismatched ciphertext is NOT an error: it returns the implicit-rejection
//! secret, and callers must not be able to distinguish that case.

use thiserror::Error;

/// Errors reported by the byte-slice API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KemError {
    /// An input buffer does not have the exact length the parameter set
    /// mandates. No partial work is done.
    #[error("{context}: invalid length (expected {expected} bytes, got {actual})")]
    InvalidLength {
        /// Which input was malformed.
        context: &'static str,
        /// Required length for the selected parameter set.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// The requested module rank is not one of 2, 3, or 4.
    #[error("unsupported parameter set k = {0} (must be 2, 3, or 4)")]
    UnsupportedParameterSet(usize),

    /// The operating-system random source failed. Deliberately opaque.
    #[error("random byte source failed")]
    RandomSource,
}
