//! Schmidt decomposition engine for bipartite pure states
//!
//! Reshapes a state vector on `dim_a × dim_b` into its coefficient matrix,
//! computes the singular value decomposition and derives the Schmidt
//! coefficients, Schmidt rank, entanglement flag and entanglement entropy.
//!
//! - [`SchmidtDecomposer`]: configurable decomposer, also in batch (rayon)
//! - [`SchmidtDecomposition`]: the immutable result record
//! - [`matrix`], [`svd`]: reshaping and sorted SVD helpers

pub mod error;
pub mod matrix;
pub mod schmidt;
pub mod svd;

pub use error::{DecompositionError, Result};
pub use schmidt::{
    decompose, von_neumann_entropy, DecomposerConfig, EntanglementClass, SchmidtDecomposer,
    SchmidtDecomposition, DEFAULT_ENTROPY_GUARD, DEFAULT_MAX_ITERATIONS,
    DEFAULT_SCHMIDT_THRESHOLD,
};
pub use svd::{sorted_svd, SortedSvd};
