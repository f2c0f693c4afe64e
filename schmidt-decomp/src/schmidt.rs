//! Schmidt decomposition of bipartite pure states
//!
//! # Overview
//!
//! Any pure state on `H_A ⊗ H_B` can be written as
//!
//! ```text
//! |ψ⟩ = Σᵢ λᵢ |uᵢ⟩_A ⊗ |vᵢ⟩_B
//! ```
//!
//! with orthonormal `{|uᵢ⟩}`, `{|vᵢ⟩}` and `λ₀ ≥ λ₁ ≥ ... ≥ 0`. The λᵢ (Schmidt
//! coefficients) are the singular values of the coefficient matrix
//! `M[a][b] = ψ[a * dim_b + b]`.
//!
//! # Derived quantities
//!
//! - **Schmidt rank**: number of λᵢ above the threshold τ (default 1e-10)
//! - **Entangled**: rank > 1
//! - **Entanglement entropy**: `S = -Σ pᵢ log₂ pᵢ` with `pᵢ = λᵢ²`, the von
//!   Neumann entropy of either reduced density matrix
//!
//! # Example
//!
//! ```
//! use num_complex::Complex64;
//! use schmidt_decomp::decompose;
//!
//! let h = 1.0 / 2.0_f64.sqrt();
//! let bell = [
//!     Complex64::new(h, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(h, 0.0),
//! ];
//!
//! let result = decompose(&bell, 2, 2).unwrap();
//! assert_eq!(result.rank(), 2);
//! assert!(result.is_entangled());
//! assert!((result.entropy() - 1.0).abs() < 1e-9);
//! ```

use crate::error::Result;
use crate::matrix::{reshape, weighted_outer_sum};
use crate::svd::{sorted_svd, SortedSvd};
use num_complex::Complex64;
use rayon::prelude::*;
use schmidt_state::validation::NORM_TOLERANCE;
use schmidt_state::{check_finite, norm_deviation, validate_bipartition, Bipartition, StateError};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Coefficients at or below this value are structurally zero
pub const DEFAULT_SCHMIDT_THRESHOLD: f64 = 1e-10;

/// Offset added inside the logarithm of the entropy sum
///
/// Keeps `log₂` finite for probabilities that barely survive the threshold.
pub const DEFAULT_ENTROPY_GUARD: f64 = 1e-15;

/// Default budget of Jacobi sweeps for the SVD
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Tolerance on `log₂(rank) - S` for calling a state maximally entangled
const MAXIMAL_ENTROPY_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for [`SchmidtDecomposer`]
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposerConfig {
    /// Schmidt coefficients `<= threshold` do not count towards the rank
    pub threshold: f64,

    /// Numerical guard inside `log₂(p + guard)`
    pub entropy_guard: f64,

    /// Keep the Schmidt vectors of both subsystems in the result
    pub compute_vectors: bool,

    /// Jacobi sweep budget of the SVD (0 = sweep until convergence)
    pub max_iterations: usize,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCHMIDT_THRESHOLD,
            entropy_guard: DEFAULT_ENTROPY_GUARD,
            compute_vectors: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl DecomposerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_entropy_guard(mut self, guard: f64) -> Self {
        self.entropy_guard = guard;
        self
    }

    pub fn with_vectors(mut self, enabled: bool) -> Self {
        self.compute_vectors = enabled;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

// ============================================================================
// Result
// ============================================================================

/// Entanglement category of a bipartite pure state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntanglementClass {
    /// Schmidt rank ≤ 1, separable
    Product,
    /// Entangled but below the maximal entropy for the bipartition
    PartiallyEntangled,
    /// Full Schmidt rank with equal coefficients, `S = log₂ min(dim_a, dim_b)`
    MaximallyEntangled,
}

impl fmt::Display for EntanglementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Product => "Product State (Not Entangled)",
            Self::PartiallyEntangled => "Partially Entangled",
            Self::MaximallyEntangled => "Maximally Entangled",
        };
        f.write_str(label)
    }
}

/// Outcome of one decomposition; immutable once built
///
/// Serializes to the stable JSON shape
/// `{ "schmidt_rank", "schmidt_coefficients", "is_entangled", "entropy" }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchmidtDecomposition {
    #[serde(rename = "schmidt_rank")]
    rank: usize,

    /// All `min(dim_a, dim_b)` singular values, descending
    #[serde(rename = "schmidt_coefficients")]
    coefficients: Vec<f64>,

    is_entangled: bool,

    entropy: f64,

    #[serde(skip)]
    bipartition: Bipartition,

    /// `|uᵢ⟩`, each of length dim_a
    #[serde(skip)]
    vectors_a: Option<Vec<Vec<Complex64>>>,

    /// `|vᵢ⟩`, each of length dim_b
    #[serde(skip)]
    vectors_b: Option<Vec<Vec<Complex64>>>,
}

impl SchmidtDecomposition {
    /// Number of Schmidt coefficients above the threshold
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// All Schmidt coefficients in descending order, including those below the threshold
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The leading `rank` coefficients
    pub fn significant_coefficients(&self) -> &[f64] {
        &self.coefficients[..self.rank]
    }

    /// Schmidt probabilities `pᵢ = λᵢ²` (eigenvalues of either reduced state)
    pub fn probabilities(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c * c).collect()
    }

    #[inline]
    pub fn is_entangled(&self) -> bool {
        self.is_entangled
    }

    /// Von Neumann entropy of the reduced state, in bits
    #[inline]
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    #[inline]
    pub fn bipartition(&self) -> Bipartition {
        self.bipartition
    }

    /// Schmidt vectors of subsystem A, if computed
    pub fn schmidt_vectors_a(&self) -> Option<&[Vec<Complex64>]> {
        self.vectors_a.as_deref()
    }

    /// Schmidt vectors of subsystem B, if computed
    pub fn schmidt_vectors_b(&self) -> Option<&[Vec<Complex64>]> {
        self.vectors_b.as_deref()
    }

    /// Purity Tr(ρ_A²) = Σ pᵢ² of the reduced state
    pub fn purity(&self) -> f64 {
        self.coefficients.iter().map(|c| c.powi(4)).sum()
    }

    /// Product, partially or maximally entangled
    ///
    /// Full Schmidt rank alone does not make a state maximally entangled:
    /// the entropy must also reach `log₂ min(dim_a, dim_b)` within 1e-6. A
    /// rank-only rule would report `0.8|00⟩ + 0.6|11⟩` as maximally
    /// entangled; here it is partially entangled.
    pub fn classification(&self) -> EntanglementClass {
        if !self.is_entangled {
            return EntanglementClass::Product;
        }
        let max_rank = self.bipartition.max_rank();
        let max_entropy = (max_rank as f64).log2();
        if self.rank == max_rank && (max_entropy - self.entropy).abs() < MAXIMAL_ENTROPY_TOLERANCE
        {
            EntanglementClass::MaximallyEntangled
        } else {
            EntanglementClass::PartiallyEntangled
        }
    }

    /// Rebuild `Σᵢ λᵢ |uᵢ⟩⊗|vᵢ⟩` as a row-major state vector
    ///
    /// Returns `None` when the Schmidt vectors were not computed.
    pub fn reconstruct(&self) -> Option<Vec<Complex64>> {
        let a = self.vectors_a.as_ref()?;
        let b = self.vectors_b.as_ref()?;
        Some(weighted_outer_sum(&self.coefficients, a, b, self.bipartition))
    }
}

/// `-Σ pᵢ log₂(pᵢ + guard)` over coefficients above `threshold`, `pᵢ = λᵢ²`
///
/// Terms at or below the threshold contribute nothing (0·log 0 = 0). The sum
/// is clamped at zero: for a single coefficient of 1 the guard would
/// otherwise leave a residue of about -1e-15.
pub fn von_neumann_entropy(coefficients: &[f64], threshold: f64, guard: f64) -> f64 {
    let entropy: f64 = coefficients
        .iter()
        .filter(|&&c| c > threshold)
        .map(|&c| {
            let p = c * c;
            -p * (p + guard).log2()
        })
        .sum();
    entropy.max(0.0)
}

// ============================================================================
// Decomposer
// ============================================================================

/// Computes Schmidt decompositions with a fixed configuration
///
/// Holds no state between calls, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct SchmidtDecomposer {
    config: DecomposerConfig,
}

impl SchmidtDecomposer {
    pub fn new(config: DecomposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Decompose a state over a `dim_a × dim_b` bipartition
    ///
    /// The state is expected to be normalized; the length is checked again
    /// here.
    ///
    /// # Errors
    /// - [`StateError::InvalidBipartition`] for zero dimensions
    /// - [`StateError::DimensionMismatch`] if `amplitudes.len() != dim_a * dim_b`
    /// - [`StateError::DegenerateState`] for NaN or infinite amplitudes
    /// - [`DecompositionError::NoConvergence`](crate::DecompositionError::NoConvergence)
    ///   if the SVD exceeds its sweep budget
    /// - [`DecompositionError::InaccurateDecomposition`](crate::DecompositionError::InaccurateDecomposition)
    ///   if the SVD does not reproduce the coefficient matrix
    pub fn decompose(
        &self,
        amplitudes: &[Complex64],
        dim_a: usize,
        dim_b: usize,
    ) -> Result<SchmidtDecomposition> {
        let bipartition = Bipartition::new(dim_a, dim_b)?;
        self.decompose_bipartite(amplitudes, bipartition)
    }

    /// Same as [`decompose`](Self::decompose) for a prebuilt [`Bipartition`]
    pub fn decompose_bipartite(
        &self,
        amplitudes: &[Complex64],
        bipartition: Bipartition,
    ) -> Result<SchmidtDecomposition> {
        validate_bipartition(amplitudes, bipartition)?;
        if !check_finite(amplitudes) {
            return Err(StateError::DegenerateState { norm: f64::NAN }.into());
        }
        let deviation = norm_deviation(amplitudes);
        if deviation > NORM_TOLERANCE {
            debug!(deviation, "decomposing a state that is not normalized");
        }

        let matrix = reshape(amplitudes, bipartition);
        let svd = if matrix.iter().all(|z| *z == Complex64::new(0.0, 0.0)) {
            SortedSvd {
                singular_values: vec![0.0; bipartition.max_rank()],
                u: None,
                v_t: None,
            }
        } else {
            sorted_svd(
                matrix,
                self.config.compute_vectors,
                self.config.max_iterations,
            )?
        };

        let coefficients = svd.singular_values;
        let rank = coefficients
            .iter()
            .filter(|&&c| c > self.config.threshold)
            .count();
        let entropy =
            von_neumann_entropy(&coefficients, self.config.threshold, self.config.entropy_guard);

        let vectors_a = svd.u.map(|u| {
            u.column_iter()
                .map(|column| column.iter().copied().collect())
                .collect()
        });
        let vectors_b = svd.v_t.map(|v_t| {
            v_t.row_iter()
                .map(|row| row.iter().copied().collect())
                .collect()
        });

        debug!(%bipartition, rank, entropy, "schmidt decomposition");

        Ok(SchmidtDecomposition {
            rank,
            coefficients,
            is_entangled: rank > 1,
            entropy,
            bipartition,
            vectors_a,
            vectors_b,
        })
    }

    /// Decompose many states over the same bipartition in parallel
    ///
    /// Results are returned in input order; each entry fails independently.
    pub fn decompose_batch(
        &self,
        states: &[Vec<Complex64>],
        bipartition: Bipartition,
    ) -> Vec<Result<SchmidtDecomposition>> {
        states
            .par_iter()
            .map(|state| self.decompose_bipartite(state, bipartition))
            .collect()
    }
}

/// Decompose with the default configuration
pub fn decompose(
    amplitudes: &[Complex64],
    dim_a: usize,
    dim_b: usize,
) -> Result<SchmidtDecomposition> {
    SchmidtDecomposer::default().decompose(amplitudes, dim_a, dim_b)
}
