//! Catalog of named reference states
//!
//! Bell states, product states and partially entangled states on two qubits.
//! `expected_rank` documents the Schmidt rank of each entry; nothing enforces
//! it at runtime, the catalog tests do.

use crate::bipartition::Bipartition;
use crate::error::{Result, StateError};
use num_complex::Complex64;

/// 1/√2 as produced by `1.0 / 2f64.sqrt()`
const INV_SQRT2: f64 = 0.7071067811865475;

/// 1/√3 as produced by `1.0 / 3f64.sqrt()`
const INV_SQRT3: f64 = 0.5773502691896258;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

const fn re(value: f64) -> Complex64 {
    Complex64::new(value, 0.0)
}

/// A named, immutable reference state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetState {
    /// Lookup key, e.g. `bell_phi_plus`
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    pub description: &'static str,
    /// Amplitudes in row-major order over `dim_a × dim_b`
    pub amplitudes: &'static [Complex64],
    pub dim_a: usize,
    pub dim_b: usize,
    /// Schmidt rank of the state
    pub expected_rank: usize,
}

impl PresetState {
    /// Owned copy of the amplitudes
    pub fn to_vector(&self) -> Vec<Complex64> {
        self.amplitudes.to_vec()
    }

    /// Subsystem dimensions of this preset
    pub fn bipartition(&self) -> Bipartition {
        Bipartition::from_static(self.dim_a, self.dim_b)
    }
}

static PRESETS: [PresetState; 9] = [
    PresetState {
        key: "bell_phi_plus",
        name: "Bell State |Φ+⟩",
        description: "Maximally entangled: (|00⟩ + |11⟩)/√2",
        amplitudes: &[re(INV_SQRT2), ZERO, ZERO, re(INV_SQRT2)],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 2,
    },
    PresetState {
        key: "bell_phi_minus",
        name: "Bell State |Φ-⟩",
        description: "Maximally entangled: (|00⟩ - |11⟩)/√2",
        amplitudes: &[re(INV_SQRT2), ZERO, ZERO, re(-INV_SQRT2)],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 2,
    },
    PresetState {
        key: "bell_psi_plus",
        name: "Bell State |Ψ+⟩",
        description: "Maximally entangled: (|01⟩ + |10⟩)/√2",
        amplitudes: &[ZERO, re(INV_SQRT2), re(INV_SQRT2), ZERO],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 2,
    },
    PresetState {
        key: "bell_psi_minus",
        name: "Bell State |Ψ-⟩",
        description: "Maximally entangled: (|01⟩ - |10⟩)/√2",
        amplitudes: &[ZERO, re(INV_SQRT2), re(-INV_SQRT2), ZERO],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 2,
    },
    PresetState {
        key: "product_00",
        name: "Product State |0⟩⊗|0⟩",
        description: "Not entangled: |00⟩",
        amplitudes: &[ONE, ZERO, ZERO, ZERO],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 1,
    },
    PresetState {
        key: "product_01",
        name: "Product State |0⟩⊗|1⟩",
        description: "Not entangled: |01⟩",
        amplitudes: &[ZERO, ONE, ZERO, ZERO],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 1,
    },
    PresetState {
        key: "product_plus_plus",
        name: "Product State |+⟩⊗|+⟩",
        description: "Not entangled: (|0⟩+|1⟩)⊗(|0⟩+|1⟩)/2",
        amplitudes: &[re(0.5), re(0.5), re(0.5), re(0.5)],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 1,
    },
    PresetState {
        key: "partial_entangled",
        name: "Partially Entangled State",
        description: "Partially entangled: 0.8|00⟩ + 0.6|11⟩",
        amplitudes: &[re(0.8), ZERO, ZERO, re(0.6)],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 2,
    },
    PresetState {
        key: "w_state",
        name: "W-like State (2×2)",
        description: "Symmetric entangled state",
        amplitudes: &[re(INV_SQRT3), re(INV_SQRT3), re(INV_SQRT3), ZERO],
        dim_a: 2,
        dim_b: 2,
        expected_rank: 2,
    },
];

/// All catalog entries, in display order
pub fn presets() -> &'static [PresetState] {
    &PRESETS
}

/// Look up a preset by key
///
/// # Errors
/// [`StateError::UnknownPreset`] if the key is not in the catalog.
///
/// # Example
/// ```
/// use schmidt_state::preset;
///
/// let bell = preset("bell_phi_plus").unwrap();
/// assert_eq!(bell.expected_rank, 2);
/// assert!(preset("ghz").is_err());
/// ```
pub fn preset(key: &str) -> Result<&'static PresetState> {
    PRESETS
        .iter()
        .find(|p| p.key == key)
        .ok_or_else(|| StateError::UnknownPreset(key.to_string()))
}
