//! Analyzer configuration
//!
//! Every field has a default, so a TOML document only needs the keys it
//! changes:
//!
//! ```toml
//! seed = 42
//! threshold = 1e-8
//! compute_vectors = false
//! ```

use crate::error::Result;
use schmidt_decomp::{
    DecomposerConfig, DEFAULT_ENTROPY_GUARD, DEFAULT_MAX_ITERATIONS, DEFAULT_SCHMIDT_THRESHOLD,
};
use schmidt_state::validation::DEGENERATE_NORM_EPSILON;
use serde::{Deserialize, Serialize};

/// Configuration for [`Analyzer`](crate::Analyzer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Seed for random states (`None` = seeded from OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Schmidt coefficients at or below this value do not count towards the rank
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Guard inside `log₂(p + guard)` of the entropy sum
    #[serde(default = "default_entropy_guard")]
    pub entropy_guard: f64,

    /// States with a smaller norm are rejected as degenerate
    #[serde(default = "default_norm_epsilon")]
    pub norm_epsilon: f64,

    /// Keep Schmidt vectors in the decomposition
    #[serde(default = "default_true")]
    pub compute_vectors: bool,

    /// Jacobi sweep budget of the SVD (0 = unlimited)
    #[serde(default = "default_max_svd_iterations")]
    pub max_svd_iterations: usize,
}

fn default_threshold() -> f64 {
    DEFAULT_SCHMIDT_THRESHOLD
}

fn default_entropy_guard() -> f64 {
    DEFAULT_ENTROPY_GUARD
}

fn default_norm_epsilon() -> f64 {
    DEGENERATE_NORM_EPSILON
}

fn default_true() -> bool {
    true
}

fn default_max_svd_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: None,
            threshold: default_threshold(),
            entropy_guard: default_entropy_guard(),
            norm_epsilon: default_norm_epsilon(),
            compute_vectors: true,
            max_svd_iterations: default_max_svd_iterations(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    /// [`AnalysisError::Config`](crate::AnalysisError::Config) on malformed
    /// TOML, wrong value types or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_entropy_guard(mut self, guard: f64) -> Self {
        self.entropy_guard = guard;
        self
    }

    pub fn with_norm_epsilon(mut self, epsilon: f64) -> Self {
        self.norm_epsilon = epsilon;
        self
    }

    pub fn with_vectors(mut self, enabled: bool) -> Self {
        self.compute_vectors = enabled;
        self
    }

    pub fn with_max_svd_iterations(mut self, max_iterations: usize) -> Self {
        self.max_svd_iterations = max_iterations;
        self
    }

    /// Decomposer settings carried by this configuration
    pub fn decomposer_config(&self) -> DecomposerConfig {
        DecomposerConfig::new()
            .with_threshold(self.threshold)
            .with_entropy_guard(self.entropy_guard)
            .with_vectors(self.compute_vectors)
            .with_max_iterations(self.max_svd_iterations)
    }
}
