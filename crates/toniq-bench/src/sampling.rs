//! Sampling runner boundary.
//!
//! A [`SamplingRunner`] executes QAOA for a QUBO instance on some backend,
//! repeatedly, and reports for each repetition how much probability mass the
//! final state put on every basis state. The scoring pipeline only needs the
//! mass on the known ground-state index; see [`accuracy_samples`].
//!
//! ```text
//!   run_sampling() ──→ Vec<StateDistribution> ──→ accuracy_samples()
//!     (async)            (one per repetition)        (mass on ground index)
//! ```
//!
//! Distributions are keyed by decimal state index, with bit `i` of the index
//! holding qubit `i`.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{BenchError, BenchResult};
use crate::matrix::QuboMatrix;

/// Sparse probability distribution over basis-state indices.
pub type StateDistribution = FxHashMap<u64, f64>;

/// Backend-independent options passed to a sampling runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingOptions {
    /// Measurement shots per repetition; `None` requests exact probabilities
    /// when the backend can provide them.
    pub shots: Option<u32>,
    /// Optimizer iteration budget per repetition.
    pub max_iterations: u32,
    /// Seed for reproducible runs.
    pub seed: Option<u64>,
    /// Backend-specific settings.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            shots: None,
            max_iterations: 100,
            seed: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl SamplingOptions {
    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Set the optimizer iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add a backend-specific setting.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A backend able to run QAOA on a QUBO instance.
///
/// The runner itself is the backend handle. Calls may be slow; callers own
/// retries and cancellation.
#[async_trait]
pub trait SamplingRunner: Send + Sync {
    /// Name of the backend.
    fn name(&self) -> &str;

    /// Run QAOA `repetitions` times with `layers` layers.
    ///
    /// MUST return exactly one distribution per repetition, in order.
    async fn run(
        &self,
        matrix: &QuboMatrix,
        layers: u32,
        repetitions: u32,
        options: &SamplingOptions,
    ) -> BenchResult<Vec<StateDistribution>>;
}

/// Delegate to `runner` and check that every repetition was reported.
#[instrument(skip(runner, matrix, options), fields(backend = runner.name()))]
pub async fn run_sampling(
    runner: &dyn SamplingRunner,
    matrix: &QuboMatrix,
    layers: u32,
    repetitions: u32,
    options: &SamplingOptions,
) -> BenchResult<Vec<StateDistribution>> {
    if layers == 0 {
        return Err(BenchError::InvalidInput("layer count must be at least 1".into()));
    }

    let distributions = runner.run(matrix, layers, repetitions, options).await?;
    if distributions.len() != repetitions as usize {
        return Err(BenchError::Sampling(format!(
            "backend '{}' returned {} distributions for {} repetitions",
            runner.name(),
            distributions.len(),
            repetitions
        )));
    }

    debug!("Collected {} distributions", distributions.len());
    Ok(distributions)
}

/// Probability mass each run assigned to `ground_index`.
///
/// A run without an entry for the index contributes `0.0`.
pub fn accuracy_samples(
    distributions: &[StateDistribution],
    ground_index: u64,
) -> BenchResult<Vec<f64>> {
    distributions
        .iter()
        .enumerate()
        .map(|(run, dist)| {
            let p = dist.get(&ground_index).copied().unwrap_or(0.0);
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(BenchError::InvalidInput(format!(
                    "run {run} assigned mass {p} to state {ground_index}"
                )));
            }
            Ok(p)
        })
        .collect()
}
