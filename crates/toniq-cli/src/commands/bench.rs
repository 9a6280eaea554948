//! Bench command implementation.
//!
//! `toniq bench [--config bench.yaml] [--dim N] [--layers P] [--backend noisy --noise 0.05]`

use std::path::Path;

use anyhow::Result;
use console::style;
use tracing::debug;

use toniq_adapter_sim::QaoaSimulator;
use toniq_bench::{BenchConfig, run_benchmark};

use super::common::{emit_json, get_runner, spinner};

/// Merge the YAML config (if any) with command-line overrides.
pub fn load_config(
    config: Option<&str>,
    dim: Option<usize>,
    layers: Option<u32>,
    seed: Option<u64>,
) -> Result<BenchConfig> {
    let mut config = match config {
        Some(path) => BenchConfig::from_yaml_file(Path::new(path))?,
        None => BenchConfig::default(),
    };
    if let Some(dim) = dim {
        config.dim = dim;
    }
    if let Some(layers) = layers {
        config.layers = layers;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
        config.sampling.seed = Some(seed);
    }
    debug!("Benchmark config: {config:?}");
    Ok(config)
}

/// Execute the bench command.
pub async fn execute(
    config: Option<&str>,
    dim: Option<usize>,
    layers: Option<u32>,
    seed: Option<u64>,
    backend: &str,
    noise: f64,
    output: Option<&str>,
) -> Result<()> {
    let config = load_config(config, dim, layers, seed)?;
    let reference = QaoaSimulator::new().with_name("reference");
    let target = get_runner(backend, noise)?;

    let progress = spinner(format!(
        "Benchmarking '{backend}' on a {}-variable instance...",
        config.dim
    ))?;
    let result = run_benchmark(&reference, &target, &config).await;
    progress.finish_and_clear();
    let result = result?;

    emit_json(&result, output)?;

    eprintln!();
    eprintln!("{}", style("Benchmark Summary").bold().underlined());
    eprintln!(
        "  Backend:     {} ({} qubits, {} layers)",
        backend, config.dim, config.layers
    );
    eprintln!(
        "  Score:       {}",
        style(format!("{:.4}", result.value)).green().bold()
    );
    if let Some(acc) = result.metrics.get("mean_accuracy").and_then(|v| v.as_f64()) {
        eprintln!("  Accuracy:    {acc:.4} (target mean)");
    }
    if let Some(acc) = result
        .metrics
        .get("reference_mean_accuracy")
        .and_then(|v| v.as_f64())
    {
        eprintln!("  Reference:   {acc:.4} (ideal mean)");
    }
    eprintln!("  Duration:    {:?}", result.duration);

    Ok(())
}
