//! Error taxonomy for the geometry core (scales, regression, chart layout).
//!
//! All variants are local, synchronous input errors: the caller has to fix the
//! input, retrying never helps. Higher layers (renderer, storage, CLI) wrap these
//! in `anyhow::Error`.

use thiserror::Error;

/// Errors raised by the pure computation layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Regression/correlation on fewer than two points or on points whose x (or y)
    /// values have zero variance.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A linear scale whose domain (or range, for inversion) has zero width.
    #[error("degenerate domain [{min}, {max}]")]
    DegenerateDomain { min: f64, max: f64 },

    /// A band/ordinal scale was constructed with a repeated key.
    #[error("duplicate key {0:?} in scale domain")]
    DuplicateKey(String),

    /// A band/ordinal scale was asked to map a key outside its domain.
    #[error("unknown key {0:?}")]
    UnknownKey(String),

    /// Band padding outside `[0, 1)`.
    #[error("band padding must be in [0, 1), got {0}")]
    InvalidPadding(f64),

    /// Inconsistent chart configuration or data shape.
    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the geometry core.
pub type Result<T> = std::result::Result<T, ChartError>;
