//! Subsystem dimensions of a bipartite state

use crate::error::{Result, StateError};
use std::fmt;

/// Split of a Hilbert space into subsystems A and B
///
/// A state on this space has `dim_a * dim_b` amplitudes. Amplitude `i`
/// belongs to basis state `|i / dim_b⟩_A ⊗ |i % dim_b⟩_B`.
///
/// # Example
/// ```
/// use schmidt_state::Bipartition;
///
/// let qutrits = Bipartition::new(3, 3).unwrap();
/// assert_eq!(qutrits.total_dimension(), 9);
/// assert_eq!(qutrits.max_rank(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bipartition {
    dim_a: usize,
    dim_b: usize,
}

impl Bipartition {
    /// Create a bipartition, rejecting zero dimensions and overflowing products
    pub fn new(dim_a: usize, dim_b: usize) -> Result<Self> {
        if dim_a == 0 || dim_b == 0 || dim_a.checked_mul(dim_b).is_none() {
            return Err(StateError::InvalidBipartition { dim_a, dim_b });
        }
        Ok(Self { dim_a, dim_b })
    }

    /// Dimensions known to be valid at compile time (catalog entries)
    pub(crate) const fn from_static(dim_a: usize, dim_b: usize) -> Self {
        Self { dim_a, dim_b }
    }

    /// Two qubits (2×2)
    pub const fn two_qubits() -> Self {
        Self { dim_a: 2, dim_b: 2 }
    }

    /// Dimension of subsystem A
    #[inline]
    pub fn dim_a(&self) -> usize {
        self.dim_a
    }

    /// Dimension of subsystem B
    #[inline]
    pub fn dim_b(&self) -> usize {
        self.dim_b
    }

    /// Length of a state vector on this space
    #[inline]
    pub fn total_dimension(&self) -> usize {
        self.dim_a * self.dim_b
    }

    /// Largest possible Schmidt rank, min(dim_a, dim_b)
    #[inline]
    pub fn max_rank(&self) -> usize {
        self.dim_a.min(self.dim_b)
    }
}

impl fmt::Display for Bipartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.dim_a, self.dim_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bipartition() {
        let bp = Bipartition::new(2, 3).unwrap();
        assert_eq!(bp.dim_a(), 2);
        assert_eq!(bp.dim_b(), 3);
        assert_eq!(bp.total_dimension(), 6);
        assert_eq!(bp.max_rank(), 2);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Bipartition::new(0, 2),
            Err(StateError::InvalidBipartition { dim_a: 0, dim_b: 2 })
        );
        assert!(Bipartition::new(2, 0).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(Bipartition::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_trivial_bipartition() {
        let bp = Bipartition::new(1, 1).unwrap();
        assert_eq!(bp.total_dimension(), 1);
        assert_eq!(bp.max_rank(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Bipartition::two_qubits().to_string(), "2×2");
    }
}
