//! Error types for the decomposer

use schmidt_state::StateError;
use thiserror::Error;

/// Errors that can occur while decomposing a state
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecompositionError {
    /// Input state rejected (wrong length, invalid bipartition, ...)
    #[error(transparent)]
    State(#[from] StateError),

    /// Jacobi sweeps did not converge within the configured budget
    #[error("Singular value decomposition did not converge within {max_iterations} sweeps")]
    NoConvergence { max_iterations: usize },

    /// `U · diag(σ) · Vᴴ` does not reproduce the coefficient matrix
    #[error("Singular value decomposition is inaccurate (residual {residual:e})")]
    InaccurateDecomposition { residual: f64 },
}

/// Result type for decomposition operations
pub type Result<T> = std::result::Result<T, DecompositionError>;
