//! Result type alias used across all crates.

use crate::error::TesseraError;

/// Result type for all Tessera operations.
pub type TesseraResult<T> = Result<T, TesseraError>;
