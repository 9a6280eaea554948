//! End-to-end benchmark pipeline.
//!
//! ```text
//! [QUBO matrix] -> ground state -> reference runner x N -> score curve -> Scorer
//!                                                                         |
//!                                  target runner x M -> accuracies -> scores
//! ```

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{BenchError, BenchResult};
use crate::ground_state::{GroundState, solve_ground_state};
use crate::matrix::{DEFAULT_LOWER, DEFAULT_UPPER, QuboMatrix, generate_matrix, generate_matrix_seeded};
use crate::sampling::{SamplingOptions, SamplingRunner, accuracy_samples, run_sampling};
use crate::score::{DEFAULT_BIN_COUNT, ScoreCurve, Scorer, build_scorer_with_bins};
use crate::BenchmarkResult;

/// Offset between the reference and target sampling seeds.
const TARGET_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Benchmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of binary variables (qubits).
    pub dim: usize,
    /// Lower bound of random matrix elements.
    pub lower: f64,
    /// Upper bound of random matrix elements.
    pub upper: f64,
    /// Number of QAOA layers.
    pub layers: u32,
    /// Repetitions on the reference backend.
    pub reference_reps: u32,
    /// Repetitions on the backend under test.
    pub target_reps: u32,
    /// Histogram bins of the score curve.
    pub bin_count: usize,
    /// Sampling options. Backend-specific `extra` keys reach only the target
    /// runner, and the target samples from a seed derived from `seed`.
    pub sampling: SamplingOptions,
    /// Seed for matrix generation.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dim: 4,
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            layers: 1,
            reference_reps: 200,
            target_reps: 10,
            bin_count: DEFAULT_BIN_COUNT,
            sampling: SamplingOptions::default(),
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Load a configuration from a YAML file.
    pub fn from_yaml_file(path: &Path) -> BenchResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| BenchError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_yaml(&source)
    }

    /// Parse a configuration from YAML.
    pub fn from_yaml(source: &str) -> BenchResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Generate the problem instance described by this configuration.
    pub fn generate_matrix(&self) -> BenchResult<QuboMatrix> {
        match self.seed {
            Some(seed) => generate_matrix_seeded(self.dim, self.lower, self.upper, seed),
            None => generate_matrix(self.dim, self.lower, self.upper),
        }
    }

    /// Options for the ideal reference runner, without backend-specific keys.
    pub fn reference_options(&self) -> SamplingOptions {
        SamplingOptions {
            extra: serde_json::Map::new(),
            ..self.sampling.clone()
        }
    }

    /// Options for the backend under test.
    pub fn target_options(&self) -> SamplingOptions {
        let mut options = self.sampling.clone();
        options.seed = options.seed.map(|seed| seed.wrapping_add(TARGET_SEED_OFFSET));
        options
    }
}

/// Ideal-backend reference for one problem instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    /// The problem instance.
    pub matrix: QuboMatrix,
    /// Its exact ground state.
    pub ground_state: GroundState,
    /// Accuracy of every reference repetition.
    pub accuracies: Vec<f64>,
    /// Scoring function built from `accuracies`.
    pub scorer: Scorer,
}

impl Reference {
    /// Solve the ground state, sample the reference runner and build a scorer.
    pub async fn build(
        runner: &dyn SamplingRunner,
        matrix: QuboMatrix,
        config: &BenchConfig,
    ) -> BenchResult<Self> {
        let ground_state = solve_ground_state(&matrix)?;
        info!(
            "Ground state {} (index {}, energy {})",
            ground_state.bitstring, ground_state.index, ground_state.energy
        );

        let distributions = run_sampling(
            runner,
            &matrix,
            config.layers,
            config.reference_reps,
            &config.reference_options(),
        )
        .await?;
        let accuracies = accuracy_samples(&distributions, ground_state.index)?;
        let scorer = build_scorer_with_bins(&accuracies, config.bin_count)?;

        info!(
            "Reference '{}': {} runs, mean accuracy {:.4}",
            runner.name(),
            accuracies.len(),
            mean(&accuracies)
        );

        Ok(Self {
            matrix,
            ground_state,
            accuracies,
            scorer,
        })
    }

    /// The reference score curve.
    pub fn curve(&self) -> &ScoreCurve {
        self.scorer.curve()
    }
}

/// Score every accuracy in `accuracies`.
pub fn score_runs(scorer: &Scorer, accuracies: &[f64]) -> BenchResult<Vec<f64>> {
    accuracies.iter().map(|&a| scorer.score(a)).collect()
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Score `target` against `reference` on the instance already held by the
/// reference.
pub async fn score_backend(
    reference: &Reference,
    target: &dyn SamplingRunner,
    config: &BenchConfig,
) -> BenchResult<BenchmarkResult> {
    let start = Instant::now();

    let distributions = run_sampling(
        target,
        &reference.matrix,
        config.layers,
        config.target_reps,
        &config.target_options(),
    )
    .await?;
    let accuracies = accuracy_samples(&distributions, reference.ground_state.index)?;
    if accuracies.is_empty() {
        return Err(BenchError::InsufficientData(
            "target backend produced no runs to score".into(),
        ));
    }
    let scores = score_runs(&reference.scorer, &accuracies)?;
    let score = mean(&scores);

    info!(
        "Backend '{}': mean accuracy {:.4}, score {:.4}",
        target.name(),
        mean(&accuracies),
        score
    );

    // Hardness is diagnostic; a user-supplied matrix may not define it.
    let hardness = reference.matrix.hardness().ok();

    Ok(BenchmarkResult::new("toniq", score, "score")
        .with_duration(start.elapsed())
        .with_metric("target_backend", target.name())
        .with_metric("dim", reference.matrix.dim() as u64)
        .with_metric("layers", u64::from(config.layers))
        .with_metric("ground_index", reference.ground_state.index)
        .with_metric("ground_energy", reference.ground_state.energy)
        .with_metric("hardness", hardness)
        .with_metric("mean_accuracy", mean(&accuracies))
        .with_metric("reference_mean_accuracy", mean(&reference.accuracies))
        .with_metric("reference_reps", reference.accuracies.len() as u64)
        .with_metric("target_reps", accuracies.len() as u64)
        .with_metric("scores", scores))
}

/// Generate an instance, build the reference on `reference_runner` and score
/// `target_runner` against it.
pub async fn run_benchmark(
    reference_runner: &dyn SamplingRunner,
    target_runner: &dyn SamplingRunner,
    config: &BenchConfig,
) -> BenchResult<BenchmarkResult> {
    let start = Instant::now();
    let matrix = config.generate_matrix()?;
    let reference = Reference::build(reference_runner, matrix, config).await?;
    let result = score_backend(&reference, target_runner, config).await?;
    Ok(result.with_duration(start.elapsed()))
}
