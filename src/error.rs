//! Error type for geotrack operations.
//!
//! The numeric core never fails: empty tracks, missing timestamps or
//! altitudes all degrade to zero or absent values. Errors only report
//! contract violations at construction time and malformed FFI input.

use thiserror::Error;

/// Unified error type for geotrack operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeotrackError {
    /// A position window was created with a negative interval
    #[error("Position window interval must not be negative, got {seconds:.3}s")]
    InvalidInterval { seconds: f64 },
    /// A unix timestamp could not be represented as a date/time
    #[error("Timestamp {millis}ms is out of range")]
    InvalidTimestamp { millis: i64 },
}

/// Result type alias for geotrack operations.
pub type Result<T> = std::result::Result<T, GeotrackError>;
