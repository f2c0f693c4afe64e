//! Matrix utilities for the coefficient matrix of a bipartite state
//!
//! A state on a `dim_a × dim_b` bipartition is viewed as the matrix
//! `M[a][b] = ψ[a * dim_b + b]`; its singular values are the Schmidt
//! coefficients.

use nalgebra::DMatrix;
use num_complex::Complex64;
use schmidt_state::Bipartition;

/// Reshape a state vector into its `dim_a × dim_b` coefficient matrix
///
/// Element `i` of the vector lands at `(i / dim_b, i % dim_b)`. The caller
/// guarantees `amplitudes.len() == dim_a * dim_b`.
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use schmidt_decomp::matrix::reshape;
/// use schmidt_state::Bipartition;
///
/// let psi: Vec<Complex64> = (0..6).map(|i| Complex64::new(i as f64, 0.0)).collect();
/// let m = reshape(&psi, Bipartition::new(2, 3).unwrap());
/// assert_eq!(m[(1, 0)], Complex64::new(3.0, 0.0));
/// ```
pub fn reshape(amplitudes: &[Complex64], bipartition: Bipartition) -> DMatrix<Complex64> {
    DMatrix::from_row_slice(bipartition.dim_a(), bipartition.dim_b(), amplitudes)
}

/// Largest element-wise modulus `|aᵢⱼ - bᵢⱼ|`; infinite if the shapes differ
pub fn max_abs_difference(a: &DMatrix<Complex64>, b: &DMatrix<Complex64>) -> f64 {
    if a.shape() != b.shape() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Check if two matrices have the same shape and agree element-wise within `epsilon`
pub fn matrices_approx_eq(a: &DMatrix<Complex64>, b: &DMatrix<Complex64>, epsilon: f64) -> bool {
    max_abs_difference(a, b) <= epsilon
}

/// Σᵢ wᵢ · |leftᵢ⟩⊗|rightᵢ⟩ flattened row-major
///
/// `left[i]` has length `dim_a`, `right[i]` has length `dim_b`.
pub fn weighted_outer_sum(
    weights: &[f64],
    left: &[Vec<Complex64>],
    right: &[Vec<Complex64>],
    bipartition: Bipartition,
) -> Vec<Complex64> {
    let dim_b = bipartition.dim_b();
    let mut out = vec![Complex64::new(0.0, 0.0); bipartition.total_dimension()];

    for ((&w, u), v) in weights.iter().zip(left).zip(right) {
        for (a, &ua) in u.iter().enumerate() {
            let scaled = ua * w;
            for (b, &vb) in v.iter().enumerate() {
                out[a * dim_b + b] += scaled * vb;
            }
        }
    }
    out
}
