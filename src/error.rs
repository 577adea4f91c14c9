//! Error types for the rendering core
//!
//! Only caller-contract violations surface here. Content irregularities
//! (malformed escape sequences, unknown SGR parameters, oversized position
//! requests) are handled fail-open or fail-soft inside the parser and never
//! reach the caller as errors.

use std::fmt;

/// Errors raised when a caller violates the public API contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// maxColumns must be greater than zero
    InvalidMaxColumns(usize),

    /// Color depth must be 4, 8 or 24
    InvalidColorDepth(u8),

    /// Options could not be deserialized
    InvalidOptions(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidMaxColumns(cols) => {
                write!(f, "maxColumns must be greater than zero, got {}", cols)
            }
            CoreError::InvalidColorDepth(bits) => {
                write!(f, "color depth must be 4, 8 or 24, got {}", bits)
            }
            CoreError::InvalidOptions(msg) => write!(f, "invalid options: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}
