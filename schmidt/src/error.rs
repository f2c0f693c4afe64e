//! Error type for the analysis pipeline

use schmidt_decomp::DecompositionError;
use schmidt_state::StateError;
use thiserror::Error;

/// Any failure between receiving a request and producing its report
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Parsing, generation, normalization or dimension check failed
    #[error(transparent)]
    State(#[from] StateError),

    /// The decomposer rejected the state or the SVD did not converge
    #[error(transparent)]
    Decomposition(#[from] DecompositionError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// The underlying state error, whichever layer raised it
    pub fn state_error(&self) -> Option<&StateError> {
        match self {
            Self::State(err) => Some(err),
            Self::Decomposition(DecompositionError::State(err)) => Some(err),
            _ => None,
        }
    }
}

/// Result type for the analysis pipeline
pub type Result<T> = std::result::Result<T, AnalysisError>;
