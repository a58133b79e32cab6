//! Signal derivation error types.

use thiserror::Error;

/// Errors raised while deriving signals from telemetry snapshots.
///
/// Nothing here is fatal: every caller in this crate recovers by skipping
/// the offending record, so these surface only in logs and in direct
/// parser calls.
#[derive(Error, Debug)]
pub enum SignalError {
    /// Area text does not start with the expected geometry token
    #[error("area text is not a {expected} geometry: {text:?}")]
    AreaPrefix {
        expected: &'static str,
        text: String,
    },

    /// Area text body is not parenthesized as the grammar requires
    #[error("unbalanced area text: {0:?}")]
    Unbalanced(String),

    /// A coordinate pair is not two whitespace-separated numbers
    #[error("malformed coordinate pair: {0:?}")]
    CoordinatePair(String),

    /// A numeric token failed to parse
    #[error("invalid number in area text: {0}")]
    Number(#[from] std::num::ParseFloatError),

    /// Polygon with fewer than 3 vertices
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Circle with a negative radius
    #[error("negative circle radius: {0}")]
    NegativeRadius(f64),
}

/// Result type for signal derivation operations.
pub type Result<T> = std::result::Result<T, SignalError>;
