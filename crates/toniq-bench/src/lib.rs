//! QAOA hardware benchmark scoring for Toniq.
//!
//! Scores how well QAOA runs on a backend compared with an ideal sampling
//! baseline:
//! - **Matrix generation**: random symmetric QUBO instances with a hardness diagnostic
//! - **Ground-state search**: exhaustive ground truth for small instances
//! - **Sampling boundary**: the [`SamplingRunner`] trait implemented by backends
//! - **Score curves**: empirical CDF of ground-state accuracy and its linear interpolant
//!
//! # Example
//!
//! ```rust
//! use toniq_bench::{build_reference_curve_with_bins, build_scorer_with_bins, solve_ground_state, QuboMatrix};
//!
//! let m = QuboMatrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
//! let gs = solve_ground_state(&m).unwrap();
//! assert_eq!(gs.bitstring, "00");
//!
//! let samples = [0.1, 0.3, 0.6, 0.9];
//! let curve = build_reference_curve_with_bins(&samples, 4).unwrap();
//! assert_eq!(curve.values(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
//!
//! let scorer = build_scorer_with_bins(&samples, 4).unwrap();
//! assert_eq!(scorer.score(0.5).unwrap(), 0.5);
//! ```

pub mod benchmark;
pub mod error;
pub mod export;
pub mod ground_state;
pub mod matrix;
pub mod sampling;
pub mod score;

pub use benchmark::{BenchConfig, Reference, run_benchmark, score_backend};
pub use error::{BenchError, BenchResult};
pub use ground_state::{GroundState, solve_ground_state, solve_ground_state_rows};
pub use matrix::{QuboMatrix, generate_matrix, generate_matrix_seeded};
pub use sampling::{
    SamplingOptions, SamplingRunner, StateDistribution, accuracy_samples, run_sampling,
};
pub use score::{
    ScoreCurve, Scorer, build_reference_curve, build_reference_curve_with_bins, build_scorer,
    build_scorer_with_bins,
};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark.
    pub name: String,
    /// Primary metric value.
    pub value: f64,
    /// Unit of the primary metric.
    pub unit: String,
    /// Total wall-clock time.
    pub duration: Duration,
    /// Additional metrics.
    pub metrics: serde_json::Map<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Create a new benchmark result.
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            duration: Duration::ZERO,
            metrics: serde_json::Map::new(),
        }
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a metric.
    pub fn with_metric(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }
}
