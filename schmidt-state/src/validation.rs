//! Normalization and dimension checks
//!
//! Every state entering the decomposer passes through here: it is rescaled to
//! unit norm and its length is checked against the claimed bipartition.

use crate::bipartition::Bipartition;
use crate::error::{Result, StateError};
use num_complex::Complex64;

/// Norm below which a state is considered the zero vector
pub const DEGENERATE_NORM_EPSILON: f64 = 1e-10;

/// Largest `|‖ψ‖ - 1|` accepted as "already normalized"
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Euclidean norm sqrt(Σ|zᵢ|²)
///
/// Components are scaled by the largest modulus before squaring, so the
/// result is finite for any finite input and does not underflow to zero for
/// tiny but non-zero states.
pub fn norm(amplitudes: &[Complex64]) -> f64 {
    let scale = amplitudes.iter().map(|a| a.norm()).fold(0.0, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let sum: f64 = amplitudes.iter().map(|&a| (a / scale).norm_sqr()).sum();
    scale * sum.sqrt()
}

/// Distance of the norm from one
#[inline]
pub fn norm_deviation(amplitudes: &[Complex64]) -> f64 {
    (norm(amplitudes) - 1.0).abs()
}

/// Whether the state has unit norm within [`NORM_TOLERANCE`]
pub fn is_normalized(amplitudes: &[Complex64]) -> bool {
    norm_deviation(amplitudes) <= NORM_TOLERANCE
}

/// Rescale a state to unit norm
///
/// Returns a new vector; the input is left untouched.
///
/// # Errors
/// [`StateError::DegenerateState`] when the norm is below
/// [`DEGENERATE_NORM_EPSILON`] or not finite.
///
/// # Example
/// ```
/// use schmidt_state::validation::{norm, normalize};
/// use num_complex::Complex64;
///
/// let state = vec![Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)];
/// let unit = normalize(&state).unwrap();
/// assert!((norm(&unit) - 1.0).abs() < 1e-12);
/// assert!((unit[0].re - 0.6).abs() < 1e-12);
/// ```
pub fn normalize(amplitudes: &[Complex64]) -> Result<Vec<Complex64>> {
    normalize_with_epsilon(amplitudes, DEGENERATE_NORM_EPSILON)
}

/// [`normalize`] with a caller-chosen degenerate-norm cutoff
pub fn normalize_with_epsilon(amplitudes: &[Complex64], epsilon: f64) -> Result<Vec<Complex64>> {
    let n = norm(amplitudes);
    if !n.is_finite() || n < epsilon {
        return Err(StateError::DegenerateState { norm: n });
    }

    Ok(amplitudes.iter().map(|&a| a / n).collect())
}

/// Check that a state has exactly `dim_a * dim_b` amplitudes
///
/// # Errors
/// [`StateError::InvalidBipartition`] for zero dimensions,
/// [`StateError::DimensionMismatch`] when the length is wrong.
pub fn validate_dimensions(amplitudes: &[Complex64], dim_a: usize, dim_b: usize) -> Result<()> {
    let bipartition = Bipartition::new(dim_a, dim_b)?;
    validate_bipartition(amplitudes, bipartition)
}

/// Same as [`validate_dimensions`] for an already constructed [`Bipartition`]
pub fn validate_bipartition(amplitudes: &[Complex64], bipartition: Bipartition) -> Result<()> {
    let expected = bipartition.total_dimension();
    if amplitudes.len() != expected {
        return Err(StateError::DimensionMismatch {
            expected,
            actual: amplitudes.len(),
        });
    }
    Ok(())
}

/// Check if amplitudes contain NaN or infinity
pub fn check_finite(amplitudes: &[Complex64]) -> bool {
    amplitudes
        .iter()
        .all(|a| a.re.is_finite() && a.im.is_finite())
}
