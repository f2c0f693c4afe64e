//! # Schmidt
//!
//! Schmidt rank and entanglement analysis of bipartite pure quantum states.
//!
//! This crate ties together the workspace crates:
//!
//! - [`schmidt_state`]: parsing, normalization, dimension checks, random
//!   generation and the preset catalog
//! - [`schmidt_decomp`]: SVD-based Schmidt decomposition, rank and entropy
//!
//! and adds the request pipeline ([`Analyzer`]) with its TOML-loadable
//! [`AnalysisConfig`].
//!
//! # Quick Start
//!
//! ```
//! use schmidt::{AnalysisRequest, Analyzer, EntanglementClass};
//!
//! let mut analyzer = Analyzer::default();
//!
//! let bell = analyzer.analyze(AnalysisRequest::preset("bell_phi_plus")).unwrap();
//! assert_eq!(bell.decomposition.rank(), 2);
//! assert_eq!(bell.classification(), EntanglementClass::MaximallyEntangled);
//!
//! let manual = analyzer
//!     .analyze(AnalysisRequest::manual("[1, 0, 0, 0]", 2, 2))
//!     .unwrap();
//! assert!(!manual.decomposition.is_entangled());
//! ```

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use pipeline::{
    Analysis, AnalysisReport, AnalysisRequest, Analyzer, StateSource, DEFAULT_STATE_NAME,
};

pub use schmidt_decomp::{
    decompose, von_neumann_entropy, DecomposerConfig, DecompositionError, EntanglementClass,
    SchmidtDecomposer, SchmidtDecomposition,
};
pub use schmidt_state::{
    format_state, normalize, parse_state, preset, presets, validate_dimensions, Bipartition,
    Complex64, PresetState, StateError, StateGenerator,
};
