//! Singular value decomposition with descending singular values
//!
//! One-sided (Hestenes) Jacobi: unitary plane rotations are applied to pairs
//! of columns of `A` until all columns are mutually orthogonal, so that
//! `A · V = U · Σ`. The column norms are the singular values.
//!
//! The matrix is scaled by its largest modulus first, so amplitudes near the
//! ends of the `f64` range neither overflow nor underflow in the column Gram
//! entries. Every result is checked by reconstruction before it is returned.

use crate::error::{DecompositionError, Result};
use crate::matrix::{matrices_approx_eq, max_abs_difference};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// Largest element-wise residual of `U · Σ · Vᴴ` against the scaled input
const RECONSTRUCTION_TOLERANCE: f64 = 1e-9;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Thin SVD `M = U · diag(σ) · Vᴴ` with `k = min(rows, cols)` singular values
#[derive(Debug, Clone)]
pub struct SortedSvd {
    /// Singular values, descending and non-negative (length k)
    pub singular_values: Vec<f64>,
    /// Left singular vectors as columns (rows × k)
    pub u: Option<DMatrix<Complex64>>,
    /// Right singular vectors as rows (k × cols)
    pub v_t: Option<DMatrix<Complex64>>,
}

impl SortedSvd {
    /// Rebuild `U · diag(σ) · Vᴴ`; `None` when vectors were not computed
    pub fn reconstruct(&self) -> Option<DMatrix<Complex64>> {
        let u = self.u.as_ref()?;
        let v_t = self.v_t.as_ref()?;
        let mut scaled = u.clone();
        for (mut column, &sigma) in scaled.column_iter_mut().zip(&self.singular_values) {
            column *= Complex64::new(sigma, 0.0);
        }
        Some(scaled * v_t)
    }
}

/// Compute the thin SVD of `matrix`
///
/// `max_sweeps == 0` lets the Jacobi iteration run until convergence.
///
/// # Errors
/// - [`DecompositionError::NoConvergence`] if the sweep budget is exhausted
/// - [`DecompositionError::InaccurateDecomposition`] if `U · Σ · Vᴴ` does not
///   reproduce the input
pub fn sorted_svd(
    matrix: DMatrix<Complex64>,
    compute_vectors: bool,
    max_sweeps: usize,
) -> Result<SortedSvd> {
    let (rows, cols) = matrix.shape();
    let k = rows.min(cols);

    let scale = matrix.iter().map(|z| z.norm()).fold(0.0, f64::max);
    if scale == 0.0 {
        return Ok(SortedSvd {
            singular_values: vec![0.0; k],
            u: compute_vectors.then(|| DMatrix::identity(rows, k)),
            v_t: compute_vectors.then(|| DMatrix::identity(k, cols)),
        });
    }
    let scaled = matrix.map(|z| z / scale);

    // the iteration orthogonalizes columns, so a wide matrix is handled as Aᴴ
    let wide = rows < cols;
    let work = if wide {
        scaled.adjoint()
    } else {
        scaled.clone()
    };
    let (columns, v) = jacobi_sweeps(work, max_sweeps)?;

    let norms: Vec<f64> = columns.column_iter().map(|column| column.norm()).collect();
    let mut order: Vec<usize> = (0..norms.len()).collect();
    order.sort_by(|&i, &j| norms[j].total_cmp(&norms[i]));

    let left = orthonormal_columns(&columns, &norms, &order);
    let right = DMatrix::from_fn(v.nrows(), k, |r, c| v[(r, order[c])]);
    let singular_values = order.iter().map(|&i| norms[i]).collect();

    let (u, v_t) = if wide {
        (right, left.adjoint())
    } else {
        (left, right.adjoint())
    };
    let mut svd = SortedSvd {
        singular_values,
        u: Some(u),
        v_t: Some(v_t),
    };

    if let Some(rebuilt) = svd.reconstruct() {
        if !matrices_approx_eq(&rebuilt, &scaled, RECONSTRUCTION_TOLERANCE) {
            let residual = max_abs_difference(&rebuilt, &scaled);
            return Err(DecompositionError::InaccurateDecomposition { residual });
        }
    }

    for sigma in svd.singular_values.iter_mut() {
        *sigma *= scale;
    }
    if !compute_vectors {
        svd.u = None;
        svd.v_t = None;
    }
    Ok(svd)
}

/// Rotate column pairs of `a` until they are orthogonal
///
/// Returns `(A·V, V)` with `V` unitary. A sweep visits every pair once; the
/// iteration stops after the first sweep that performs no rotation.
fn jacobi_sweeps(
    mut a: DMatrix<Complex64>,
    max_sweeps: usize,
) -> Result<(DMatrix<Complex64>, DMatrix<Complex64>)> {
    let n = a.ncols();
    let mut v = DMatrix::identity(n, n);
    let tolerance = 4.0 * f64::EPSILON * a.nrows() as f64;
    let mut sweeps = 0;

    loop {
        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let alpha = a.column(p).norm_squared();
                let beta = a.column(q).norm_squared();
                let gamma = a.column(p).dotc(&a.column(q));

                let off = gamma.norm();
                if off < f64::MIN_POSITIVE || off <= tolerance * (alpha * beta).sqrt() {
                    continue;
                }

                let rotation = Rotation::new(alpha, beta, gamma);
                rotation.apply(&mut a, p, q);
                rotation.apply(&mut v, p, q);
                rotated = true;
            }
        }

        if !rotated {
            return Ok((a, v));
        }
        sweeps += 1;
        if max_sweeps != 0 && sweeps >= max_sweeps {
            return Err(DecompositionError::NoConvergence {
                max_iterations: max_sweeps,
            });
        }
    }
}

/// Unitary rotation of columns `p`, `q` that makes them orthogonal
///
/// With `e = γ / |γ|` the pair `(a_p, ē·a_q)` has a real inner product and
/// the real Jacobi rotation applies:
///
/// ```text
/// ζ = (β - α) / 2|γ|
/// t = sign(ζ) / (|ζ| + √(1 + ζ²))
/// c = 1 / √(1 + t²),  s = t·c
/// a_p' = c·a_p - s·ē·a_q
/// a_q' = s·a_p + c·ē·a_q
/// ```
struct Rotation {
    c: f64,
    s: f64,
    phase: Complex64,
}

impl Rotation {
    fn new(alpha: f64, beta: f64, gamma: Complex64) -> Self {
        let off = gamma.norm();
        let zeta = (beta - alpha) / (2.0 * off);
        let t = zeta.signum() / (zeta.abs() + zeta.hypot(1.0));
        let c = 1.0 / t.hypot(1.0);
        Self {
            c,
            s: c * t,
            phase: gamma.conj() / off,
        }
    }

    fn apply(&self, m: &mut DMatrix<Complex64>, p: usize, q: usize) {
        for r in 0..m.nrows() {
            let x = m[(r, p)];
            let y = m[(r, q)] * self.phase;
            m[(r, p)] = x * self.c - y * self.s;
            m[(r, q)] = x * self.s + y * self.c;
        }
    }
}

/// Normalized columns of `columns` taken in `order`
///
/// Columns with zero (or numerically dependent) direction are replaced by
/// unit vectors orthogonal to the ones already placed, so the result always
/// has orthonormal columns.
fn orthonormal_columns(
    columns: &DMatrix<Complex64>,
    norms: &[f64],
    order: &[usize],
) -> DMatrix<Complex64> {
    let rows = columns.nrows();
    let mut basis = DMatrix::zeros(rows, order.len());

    for (j, &source) in order.iter().enumerate() {
        let mut candidate = if norms[source] > 0.0 {
            let direction = columns.column(source).unscale(norms[source]);
            project_out(&basis, j, project_out(&basis, j, direction))
        } else {
            DVector::zeros(rows)
        };

        if candidate.norm() < 0.5 {
            candidate = (0..rows)
                .map(|e| {
                    let unit = DVector::from_fn(rows, |r, _| if r == e { ONE } else { ZERO });
                    project_out(&basis, j, project_out(&basis, j, unit))
                })
                .max_by(|a, b| a.norm().total_cmp(&b.norm()))
                .unwrap_or_else(|| DVector::zeros(rows));
        }

        let length = candidate.norm();
        if length > 0.0 {
            candidate.unscale_mut(length);
        }
        basis.set_column(j, &candidate);
    }
    basis
}

/// Remove the components of `vector` along the first `filled` columns of `basis`
fn project_out(
    basis: &DMatrix<Complex64>,
    filled: usize,
    mut vector: DVector<Complex64>,
) -> DVector<Complex64> {
    for i in 0..filled {
        let projection = basis.column(i).dotc(&vector);
        vector -= basis.column(i) * projection;
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn has_orthonormal_columns(matrix: &DMatrix<Complex64>, epsilon: f64) -> bool {
        let gram = matrix.adjoint() * matrix;
        let identity = DMatrix::<Complex64>::identity(gram.nrows(), gram.ncols());
        matrices_approx_eq(&gram, &identity, epsilon)
    }

    fn assert_valid(svd: &SortedSvd, m: &DMatrix<Complex64>, epsilon: f64) {
        let u = svd.u.as_ref().unwrap();
        let v = svd.v_t.as_ref().unwrap().adjoint();
        assert!(has_orthonormal_columns(u, 1e-10));
        assert!(has_orthonormal_columns(&v, 1e-10));
        assert!(svd.singular_values.windows(2).all(|w| w[0] >= w[1]));
        assert!(matrices_approx_eq(&svd.reconstruct().unwrap(), m, epsilon));
    }

    #[test]
    #[rustfmt::skip]
    fn test_diagonal_sorted() {
        let m = DMatrix::from_row_slice(3, 3, &[
            c(0.1, 0.0), c(0.0, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(0.9, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(0.0, 0.0), c(0.4, 0.0),
        ]);
        let svd = sorted_svd(m.clone(), true, 0).unwrap();
        assert_relative_eq!(svd.singular_values[0], 0.9, epsilon = 1e-10);
        assert_relative_eq!(svd.singular_values[1], 0.4, epsilon = 1e-10);
        assert_relative_eq!(svd.singular_values[2], 0.1, epsilon = 1e-10);
        assert_valid(&svd, &m, 1e-10);
    }

    #[test]
    #[rustfmt::skip]
    fn test_complex_rectangular_reconstruction() {
        let m = DMatrix::from_row_slice(2, 3, &[
            c(1.0, 2.0), c(-0.5, 0.0), c(0.0, 1.0),
            c(0.3, -0.7), c(2.0, 0.5), c(-1.0, -1.0),
        ]);
        let svd = sorted_svd(m.clone(), true, 0).unwrap();
        assert_eq!(svd.singular_values.len(), 2);
        assert!(svd.singular_values.iter().all(|&s| s >= 0.0));
        assert_eq!(svd.u.as_ref().unwrap().shape(), (2, 2));
        assert_eq!(svd.v_t.as_ref().unwrap().shape(), (2, 3));
        assert_valid(&svd, &m, 1e-10);

        let tall = m.adjoint();
        let svd_tall = sorted_svd(tall.clone(), true, 0).unwrap();
        assert_eq!(svd_tall.u.as_ref().unwrap().shape(), (3, 2));
        assert_valid(&svd_tall, &tall, 1e-10);
        for (a, b) in svd.singular_values.iter().zip(&svd_tall.singular_values) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_values_only() {
        let m = DMatrix::from_diagonal(&DVector::from_vec(vec![c(0.8, 0.0), c(0.6, 0.0)]));
        let svd = sorted_svd(m, false, 0).unwrap();
        assert!(svd.u.is_none());
        assert!(svd.v_t.is_none());
        assert!(svd.reconstruct().is_none());
        assert_relative_eq!(svd.singular_values[0], 0.8, epsilon = 1e-10);
        assert_relative_eq!(svd.singular_values[1], 0.6, epsilon = 1e-10);
    }

    #[test]
    fn test_uniform_real_matrix_has_rank_one() {
        for n in [4usize, 5, 7] {
            let m = DMatrix::from_element(n, n, c(1.0, 0.0));
            let svd = sorted_svd(m.clone(), true, 0).unwrap();
            assert_relative_eq!(svd.singular_values[0], n as f64, epsilon = 1e-12);
            assert!(svd.singular_values[1..].iter().all(|&s| s < 1e-12));
            assert_valid(&svd, &m, 1e-12);
        }
    }

    #[test]
    fn test_uniform_complex_matrix_has_rank_one() {
        for n in [4usize, 5] {
            let m = DMatrix::from_element(n, n, c(1.0, 1.0));
            let svd = sorted_svd(m.clone(), true, 0).unwrap();
            assert_relative_eq!(
                svd.singular_values[0],
                n as f64 * 2.0_f64.sqrt(),
                epsilon = 1e-12
            );
            assert!(svd.singular_values[1..].iter().all(|&s| s < 1e-12));
            assert_valid(&svd, &m, 1e-12);
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_repeated_rows_rank_two() {
        // rows r0, r1, r0 + r1, r0
        let m = DMatrix::from_row_slice(4, 3, &[
            c(1.0, 0.0), c(2.0, -1.0), c(0.0, 0.5),
            c(0.0, 1.0), c(-1.0, 0.0), c(3.0, 0.0),
            c(1.0, 1.0), c(1.0, -1.0), c(3.0, 0.5),
            c(1.0, 0.0), c(2.0, -1.0), c(0.0, 0.5),
        ]);
        let svd = sorted_svd(m.clone(), true, 0).unwrap();
        assert!(svd.singular_values[1] > 1e-3);
        assert!(svd.singular_values[2] < 1e-12);
        assert_valid(&svd, &m, 1e-10);
    }

    #[test]
    fn test_extreme_magnitudes() {
        for magnitude in [1e-200, 1e200] {
            let m = DMatrix::from_row_slice(
                2,
                2,
                &[c(0.8 * magnitude, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.6 * magnitude, 0.0)],
            );
            let svd = sorted_svd(m, false, 0).unwrap();
            assert_relative_eq!(svd.singular_values[0], 0.8 * magnitude, max_relative = 1e-12);
            assert_relative_eq!(svd.singular_values[1], 0.6 * magnitude, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_sweep_budget_exhausted() {
        let m = DMatrix::from_element(3, 3, c(1.0, 0.0));
        assert_eq!(
            sorted_svd(m, true, 1).unwrap_err(),
            DecompositionError::NoConvergence { max_iterations: 1 }
        );
    }

    #[test]
    fn test_row_vector() {
        let m = DMatrix::from_row_slice(1, 3, &[c(0.0, 3.0), c(4.0, 0.0), c(0.0, 0.0)]);
        let svd = sorted_svd(m.clone(), true, 0).unwrap();
        assert_relative_eq!(svd.singular_values[0], 5.0, epsilon = 1e-12);
        assert!(matrices_approx_eq(&svd.reconstruct().unwrap(), &m, 1e-12));
    }

    #[test]
    fn test_column_vector() {
        let m = DMatrix::from_row_slice(2, 1, &[c(0.6, 0.0), c(0.0, -0.8)]);
        let svd = sorted_svd(m.clone(), true, 0).unwrap();
        assert_relative_eq!(svd.singular_values[0], 1.0, epsilon = 1e-12);
        assert!(matrices_approx_eq(&svd.reconstruct().unwrap(), &m, 1e-12));
    }

    #[test]
    fn test_zero_matrix() {
        let m = DMatrix::<Complex64>::zeros(2, 3);
        let svd = sorted_svd(m.clone(), true, 0).unwrap();
        assert_eq!(svd.singular_values, vec![0.0, 0.0]);
        assert!(matrices_approx_eq(&svd.reconstruct().unwrap(), &m, 0.0));
    }
}
