//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur while building or checking a bipartite state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// A token of the textual input could not be read as a complex number
    #[error("Invalid state vector format: token {position} ({token:?}) {reason}")]
    Parse {
        token: String,
        position: usize,
        reason: String,
    },

    /// Norm too small (or not finite) to rescale to unit length
    #[error("State vector has zero norm (norm = {norm:e})")]
    DegenerateState { norm: f64 },

    /// Vector length does not match the claimed bipartition
    #[error("State vector size ({actual}) doesn't match dimensions product {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Subsystem dimensions must be positive and their product representable
    #[error("Invalid bipartition {dim_a}×{dim_b}")]
    InvalidBipartition { dim_a: usize, dim_b: usize },

    /// Preset key not present in the catalog
    #[error("Unknown preset state '{0}'")]
    UnknownPreset(String),

    /// Rank-targeted generation needs at least one Schmidt term
    #[error("Target Schmidt rank must be at least 1, got {rank}")]
    InvalidTargetRank { rank: usize },
}

impl StateError {
    /// Create a parse error for the token at `position`
    pub fn parse(token: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            token: token.into(),
            position,
            reason: reason.into(),
        }
    }
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
