//! Bipartite state vectors for Schmidt analysis
//!
//! This crate produces and checks the state vectors consumed by the
//! decomposer in `schmidt-decomp`:
//!
//! - [`parse_state`]: textual input (`"[1, 0, 0, 1+2i]"`) to amplitudes
//! - [`StateGenerator`]: random states, optionally with a prescribed Schmidt rank
//! - [`presets`]: catalog of Bell, product and partially entangled states
//! - [`normalize`] / [`validate_dimensions`]: unit norm and length checks
//!
//! A state is a plain `Vec<Complex64>` of length `dim_a * dim_b` in row-major
//! order: amplitude `i` multiplies `|i / dim_b⟩_A ⊗ |i % dim_b⟩_B`.
//!
//! # Example
//!
//! ```
//! use schmidt_state::{normalize, parse_state, validate_dimensions};
//!
//! let raw = parse_state("1, 0, 0, 1").unwrap();
//! validate_dimensions(&raw, 2, 2).unwrap();
//! let state = normalize(&raw).unwrap();
//! assert!((state[0].re - 0.5_f64.sqrt()).abs() < 1e-12);
//! ```

pub mod bipartition;
pub mod error;
pub mod generator;
pub mod parser;
pub mod presets;
pub mod validation;

pub use bipartition::Bipartition;
pub use error::{Result, StateError};
pub use generator::StateGenerator;
pub use num_complex::Complex64;
pub use parser::{format_state, parse_complex, parse_state};
pub use presets::{preset, presets, PresetState};
pub use validation::{
    check_finite, is_normalized, norm, norm_deviation, normalize, normalize_with_epsilon,
    validate_bipartition, validate_dimensions,
};
