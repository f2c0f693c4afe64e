//! Request-level pipeline: acquire a state, normalize, validate, decompose
//!
//! ```text
//! StateSource ──► raw amplitudes ──► validate dims ──► normalize ──► decompose ──► Analysis
//!   Manual         parse_state
//!   Amplitudes     as given
//!   Preset         catalog entry (overrides dims and name)
//!   Random         StateGenerator
//! ```

use crate::config::AnalysisConfig;
use crate::error::Result;
use num_complex::Complex64;
use schmidt_decomp::{EntanglementClass, SchmidtDecomposer, SchmidtDecomposition};
use schmidt_state::{
    normalize_with_epsilon, parse_state, preset, validate_bipartition, Bipartition,
    StateGenerator,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Name given to manual and raw-amplitude states without an explicit name
pub const DEFAULT_STATE_NAME: &str = "Custom State";

// ============================================================================
// Requests
// ============================================================================

/// Where the state vector of a request comes from
#[derive(Debug, Clone, PartialEq)]
pub enum StateSource {
    /// Textual vector, e.g. `"[0.8, 0, 0, 0.6]"` or `"1, i, -i, 1"`
    Manual(String),
    /// Amplitudes supplied directly
    Amplitudes(Vec<Complex64>),
    /// Catalog key, e.g. `"bell_phi_plus"`
    Preset(String),
    /// Random state, optionally with a prescribed Schmidt rank
    Random { target_rank: Option<usize> },
}

/// One analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub source: StateSource,
    /// Dimension of subsystem A (ignored for presets)
    pub dim_a: usize,
    /// Dimension of subsystem B (ignored for presets)
    pub dim_b: usize,
    pub name: Option<String>,
}

impl AnalysisRequest {
    pub fn new(source: StateSource, dim_a: usize, dim_b: usize) -> Self {
        Self {
            source,
            dim_a,
            dim_b,
            name: None,
        }
    }

    pub fn manual(text: impl Into<String>, dim_a: usize, dim_b: usize) -> Self {
        Self::new(StateSource::Manual(text.into()), dim_a, dim_b)
    }

    pub fn amplitudes(amplitudes: Vec<Complex64>, dim_a: usize, dim_b: usize) -> Self {
        Self::new(StateSource::Amplitudes(amplitudes), dim_a, dim_b)
    }

    /// Catalog state; its own dimensions replace the request's
    pub fn preset(key: impl Into<String>) -> Self {
        let two_qubits = Bipartition::two_qubits();
        Self::new(
            StateSource::Preset(key.into()),
            two_qubits.dim_a(),
            two_qubits.dim_b(),
        )
    }

    pub fn random(dim_a: usize, dim_b: usize, target_rank: Option<usize>) -> Self {
        Self::new(StateSource::Random { target_rank }, dim_a, dim_b)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// ============================================================================
// Results
// ============================================================================

/// A decomposed state together with how it was labelled
#[derive(Debug, Clone)]
pub struct Analysis {
    pub name: String,
    pub bipartition: Bipartition,
    /// The normalized state that was decomposed
    pub state: Vec<Complex64>,
    pub decomposition: SchmidtDecomposition,
}

impl Analysis {
    pub fn classification(&self) -> EntanglementClass {
        self.decomposition.classification()
    }

    pub fn report(&self) -> AnalysisReport<'_> {
        AnalysisReport {
            name: &self.name,
            dimensions: [self.bipartition.dim_a(), self.bipartition.dim_b()],
            classification: self.classification(),
            decomposition: &self.decomposition,
        }
    }

    /// Report as a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.report())?)
    }
}

/// Serializable summary of an [`Analysis`]
///
/// The decomposition fields (`schmidt_rank`, `schmidt_coefficients`,
/// `is_entangled`, `entropy`) are flattened next to the labels.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    pub name: &'a str,
    pub dimensions: [usize; 2],
    pub classification: EntanglementClass,
    #[serde(flatten)]
    pub decomposition: &'a SchmidtDecomposition,
}

impl fmt::Display for AnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.decomposition;
        writeln!(
            f,
            "{} ({}×{})",
            self.name, self.dimensions[0], self.dimensions[1]
        )?;
        writeln!(f, "  Schmidt rank: {}", d.rank())?;
        writeln!(f, "  Entropy:      {:.4} bits", d.entropy())?;
        writeln!(f, "  Class:        {}", self.classification)?;
        for (i, c) in d.coefficients().iter().enumerate() {
            writeln!(f, "  λ{} = {:.6}", i + 1, c)?;
        }
        Ok(())
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// Runs [`AnalysisRequest`]s through the full pipeline
///
/// Owns the RNG for random sources, so analyzing takes `&mut self`.
pub struct Analyzer {
    config: AnalysisConfig,
    decomposer: SchmidtDecomposer,
    generator: StateGenerator,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            decomposer: SchmidtDecomposer::new(config.decomposer_config()),
            generator: StateGenerator::new(config.seed),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Acquire, validate, normalize and decompose the requested state
    ///
    /// # Errors
    /// Any [`StateError`](schmidt_state::StateError) from parsing,
    /// generation, the dimension check or normalization, and any
    /// [`DecompositionError`](schmidt_decomp::DecompositionError) from the
    /// decomposer. Nothing is retried.
    #[instrument(skip_all, fields(dim_a = request.dim_a, dim_b = request.dim_b))]
    pub fn analyze(&mut self, request: AnalysisRequest) -> Result<Analysis> {
        let result = self.run(request);
        if let Err(err) = &result {
            warn!(error = %err, "state rejected");
        }
        result
    }

    fn run(&mut self, request: AnalysisRequest) -> Result<Analysis> {
        let AnalysisRequest {
            source,
            dim_a,
            dim_b,
            name,
        } = request;

        let (raw, bipartition, default_name) = match source {
            StateSource::Manual(text) => (
                parse_state(&text)?,
                Bipartition::new(dim_a, dim_b)?,
                DEFAULT_STATE_NAME.to_string(),
            ),
            StateSource::Amplitudes(amplitudes) => (
                amplitudes,
                Bipartition::new(dim_a, dim_b)?,
                DEFAULT_STATE_NAME.to_string(),
            ),
            StateSource::Preset(key) => {
                let entry = preset(&key)?;
                (entry.to_vector(), entry.bipartition(), entry.name.to_string())
            }
            StateSource::Random { target_rank } => {
                let bipartition = Bipartition::new(dim_a, dim_b)?;
                let state = match target_rank {
                    Some(rank) => self.generator.random_state_with_rank(dim_a, dim_b, rank)?,
                    None => self.generator.random_state(dim_a, dim_b)?,
                };
                (state, bipartition, format!("Random State ({bipartition})"))
            }
        };

        validate_bipartition(&raw, bipartition)?;
        let state = normalize_with_epsilon(&raw, self.config.norm_epsilon)?;
        let decomposition = self.decomposer.decompose_bipartite(&state, bipartition)?;

        let name = name.unwrap_or(default_name);
        debug!(
            %name,
            rank = decomposition.rank(),
            entropy = decomposition.entropy(),
            "analysis complete"
        );

        Ok(Analysis {
            name,
            bipartition,
            state,
            decomposition,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
