//! QAOA sampler backed by the local statevector.

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::time::Instant;
use tracing::{debug, instrument};

use toniq_bench::ground_state::MAX_GROUND_STATE_DIM;
use toniq_bench::{BenchError, BenchResult, QuboMatrix, SamplingOptions, SamplingRunner, StateDistribution};

use crate::statevector::{Statevector, sample};

/// Key in [`SamplingOptions::extra`] overriding the depolarizing strength.
pub const DEPOLARIZING_OPTION: &str = "depolarizing";

/// Local QAOA sampler.
///
/// Each repetition draws `max_iterations` random angle sets, keeps the one
/// with the lowest expected energy and reports the final state's
/// distribution. Repetitions use independent RNG streams.
#[derive(Debug)]
pub struct QaoaSimulator {
    /// Backend name.
    name: String,
    /// Maximum number of qubits supported.
    max_qubits: usize,
    /// Probability of replacing the final state with the maximally mixed one.
    depolarizing: f64,
}

impl QaoaSimulator {
    /// Create an ideal simulator with default settings.
    pub fn new() -> Self {
        Self {
            name: "simulator".into(),
            max_qubits: 20,
            depolarizing: 0.0,
        }
    }

    /// Create a simulator with custom max qubits, capped at
    /// [`MAX_GROUND_STATE_DIM`].
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits.min(MAX_GROUND_STATE_DIM);
        self
    }

    /// Mix every output distribution with the uniform one.
    pub fn with_depolarizing(mut self, depolarizing: f64) -> Self {
        self.depolarizing = depolarizing;
        self
    }

    /// Rename the backend.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn depolarizing_for(&self, options: &SamplingOptions) -> BenchResult<f64> {
        let p = match options.extra.get(DEPOLARIZING_OPTION) {
            Some(value) => value.as_f64().ok_or_else(|| {
                BenchError::InvalidInput(format!("'{DEPOLARIZING_OPTION}' must be a number"))
            })?,
            None => self.depolarizing,
        };
        if !(0.0..=1.0).contains(&p) {
            return Err(BenchError::InvalidInput(format!(
                "depolarizing strength {p} is outside [0, 1]"
            )));
        }
        Ok(p)
    }

    /// Run one repetition synchronously.
    fn run_repetition(
        &self,
        costs: &[f64],
        num_qubits: usize,
        layers: usize,
        options: &SamplingOptions,
        depolarizing: f64,
        rng: &mut SmallRng,
    ) -> StateDistribution {
        let mut best: Option<(f64, Statevector)> = None;
        for _ in 0..options.max_iterations.max(1) {
            let mut sv = Statevector::uniform(num_qubits);
            for _ in 0..layers {
                let gamma = rng.gen_range(0.0..2.0 * PI);
                let beta = rng.gen_range(0.0..PI);
                sv.apply_qaoa_layer(costs, gamma, beta);
            }
            let energy = sv.expectation(costs);
            if best.as_ref().is_none_or(|(e, _)| energy < *e) {
                best = Some((energy, sv));
            }
        }

        let mut probabilities = match best {
            Some((_, sv)) => sv.probabilities(),
            None => Statevector::uniform(num_qubits).probabilities(),
        };

        if let Some(shots) = options.shots.filter(|&s| s > 0) {
            let mut counts = vec![0u32; probabilities.len()];
            for _ in 0..shots {
                counts[sample(&probabilities, rng)] += 1;
            }
            probabilities = counts
                .into_iter()
                .map(|c| f64::from(c) / f64::from(shots))
                .collect();
        }

        if depolarizing > 0.0 {
            let uniform = 1.0 / probabilities.len() as f64;
            for p in &mut probabilities {
                *p = (1.0 - depolarizing) * *p + depolarizing * uniform;
            }
        }

        probabilities
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > 0.0)
            .map(|(i, p)| (i as u64, p.min(1.0)))
            .collect()
    }
}

impl Default for QaoaSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Energies of all basis states, scaled into [-1, 1].
fn normalized_costs(matrix: &QuboMatrix) -> Vec<f64> {
    let energies: Vec<f64> = (0..1u64 << matrix.dim()).map(|z| matrix.energy(z)).collect();
    let scale = energies.iter().fold(0.0_f64, |acc, e| acc.max(e.abs()));
    if scale == 0.0 {
        return energies;
    }
    energies.into_iter().map(|e| e / scale).collect()
}

#[async_trait]
impl SamplingRunner for QaoaSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, matrix, options))]
    async fn run(
        &self,
        matrix: &QuboMatrix,
        layers: u32,
        repetitions: u32,
        options: &SamplingOptions,
    ) -> BenchResult<Vec<StateDistribution>> {
        let num_qubits = matrix.dim();
        if num_qubits > self.max_qubits {
            return Err(BenchError::InvalidInput(format!(
                "Problem has {} qubits but simulator only supports {}",
                num_qubits, self.max_qubits
            )));
        }
        let depolarizing = self.depolarizing_for(options)?;

        let start = Instant::now();
        let costs = normalized_costs(matrix);
        let base_seed = options.seed.unwrap_or_else(|| rand::thread_rng().r#gen());

        let mut distributions = Vec::with_capacity(repetitions as usize);
        for rep in 0..repetitions {
            let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(u64::from(rep)));
            distributions.push(self.run_repetition(
                &costs,
                num_qubits,
                layers as usize,
                options,
                depolarizing,
                &mut rng,
            ));

            if rep > 0 && rep % 100 == 0 {
                debug!("Completed {} repetitions", rep);
            }
        }

        debug!("Sampling completed in {:?}", start.elapsed());
        Ok(distributions)
    }
}
