//! Reference command implementation.

use anyhow::Result;
use console::style;

use toniq_adapter_sim::QaoaSimulator;
use toniq_bench::{BenchConfig, Reference, SamplingOptions};

use super::common::{emit_json, load_matrix, spinner};

/// Execute the reference command.
pub async fn execute(
    input: &str,
    layers: u32,
    reps: u32,
    bins: usize,
    max_iterations: u32,
    seed: Option<u64>,
    output: Option<&str>,
) -> Result<()> {
    let matrix = load_matrix(input)?;

    let mut sampling = SamplingOptions::default().with_max_iterations(max_iterations);
    sampling.seed = seed;
    let config = BenchConfig {
        dim: matrix.dim(),
        layers,
        reference_reps: reps,
        bin_count: bins,
        sampling,
        ..Default::default()
    };

    let runner = QaoaSimulator::new();
    let progress = spinner(format!("Sampling {reps} QAOA runs ({layers} layers)..."))?;
    let reference = Reference::build(&runner, matrix, &config).await;
    progress.finish_and_clear();
    let reference = reference?;

    emit_json(reference.curve(), output)?;

    eprintln!();
    eprintln!("{}", style("Reference Summary").bold().underlined());
    eprintln!(
        "  Ground state: {} (index {}, energy {:.4})",
        reference.ground_state.bitstring,
        reference.ground_state.index,
        reference.ground_state.energy
    );
    eprintln!(
        "  Runs:         {}, mean accuracy {:.4}",
        reference.accuracies.len(),
        toniq_bench::benchmark::mean(&reference.accuracies)
    );
    eprintln!("  Bins:         {}", reference.curve().bin_count());

    Ok(())
}
