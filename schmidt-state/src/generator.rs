//! Synthetic bipartite states
//!
//! Two kinds of states are produced:
//! - fully random states with i.i.d. complex Gaussian amplitudes (generically
//!   of full Schmidt rank)
//! - states with a prescribed Schmidt rank, built as Σᵢ cᵢ |aᵢ⟩⊗|bᵢ⟩ from
//!   random orthonormal bases of both subsystems

use crate::bipartition::Bipartition;
use crate::error::{Result, StateError};
use crate::validation::normalize;
use nalgebra::DMatrix;
use num_complex::Complex64;
use rand::distributions::OpenClosed01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

/// Random state source with its own RNG
///
/// # Example
/// ```
/// use schmidt_state::StateGenerator;
///
/// let mut generator = StateGenerator::new(Some(7));
/// let state = generator.random_state_with_rank(3, 3, 2).unwrap();
/// assert_eq!(state.len(), 9);
/// ```
pub struct StateGenerator {
    rng: StdRng,
}

impl StateGenerator {
    /// Create a generator; `Some(seed)` makes the output reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Random state with standard normal real and imaginary parts
    ///
    /// The result is **not** normalized; pass it through
    /// [`normalize`](crate::validation::normalize) before decomposing.
    pub fn random_state(&mut self, dim_a: usize, dim_b: usize) -> Result<Vec<Complex64>> {
        let bipartition = Bipartition::new(dim_a, dim_b)?;
        Ok((0..bipartition.total_dimension())
            .map(|_| gaussian(&mut self.rng))
            .collect())
    }

    /// Normalized random state whose Schmidt rank is at most `target_rank`
    ///
    /// `target_rank` is clamped to `min(dim_a, dim_b)`. The rank is exactly
    /// `target_rank` with probability one.
    ///
    /// # Errors
    /// [`StateError::InvalidTargetRank`] for a target rank of zero,
    /// [`StateError::InvalidBipartition`] for zero dimensions.
    pub fn random_state_with_rank(
        &mut self,
        dim_a: usize,
        dim_b: usize,
        target_rank: usize,
    ) -> Result<Vec<Complex64>> {
        let bipartition = Bipartition::new(dim_a, dim_b)?;
        if target_rank == 0 {
            return Err(StateError::InvalidTargetRank { rank: target_rank });
        }

        let rank = target_rank.min(bipartition.max_rank());
        if rank < target_rank {
            debug!(
                target_rank,
                clamped = rank,
                %bipartition,
                "target Schmidt rank exceeds subsystem dimension"
            );
        }

        let basis_a = self.random_orthonormal_basis(dim_a);
        let basis_b = self.random_orthonormal_basis(dim_b);
        let coefficients = self.random_coefficients(rank);

        // ψ[a * dim_b + b] = Σᵢ cᵢ · A[a][i] · B[b][i]
        let mut state = vec![Complex64::new(0.0, 0.0); bipartition.total_dimension()];
        for (i, &coefficient) in coefficients.iter().enumerate() {
            for a in 0..dim_a {
                let left = basis_a[(a, i)] * coefficient;
                let row = &mut state[a * dim_b..(a + 1) * dim_b];
                for (b, amplitude) in row.iter_mut().enumerate() {
                    *amplitude += left * basis_b[(b, i)];
                }
            }
        }

        normalize(&state)
    }

    /// Q factor of a complex Gaussian `dim × dim` matrix; columns are orthonormal
    fn random_orthonormal_basis(&mut self, dim: usize) -> DMatrix<Complex64> {
        DMatrix::from_fn(dim, dim, |_, _| gaussian(&mut self.rng))
            .qr()
            .q()
    }

    /// `count` positive weights with unit 2-norm, sorted descending
    fn random_coefficients(&mut self, count: usize) -> Vec<f64> {
        let mut coefficients: Vec<f64> = (0..count)
            .map(|_| self.rng.sample(OpenClosed01))
            .collect();

        let norm = coefficients.iter().map(|c| c * c).sum::<f64>().sqrt();
        for c in coefficients.iter_mut() {
            *c /= norm;
        }
        coefficients.sort_by(|a, b| b.total_cmp(a));
        coefficients
    }
}

impl Default for StateGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> Complex64 {
    Complex64::new(rng.sample(StandardNormal), rng.sample(StandardNormal))
}
