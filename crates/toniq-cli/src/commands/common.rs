//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use toniq_adapter_sim::QaoaSimulator;
use toniq_bench::QuboMatrix;
use toniq_bench::export::{self, ExportConfig};

/// Load a matrix from a JSON file holding a list of rows.
pub fn load_matrix(path: &str) -> Result<QuboMatrix> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    export::from_file(Path::new(path)).with_context(|| format!("Failed to load matrix: {path}"))
}

/// Build a sampling backend by name.
pub fn get_runner(backend: &str, noise: f64) -> Result<QaoaSimulator> {
    match backend.to_lowercase().as_str() {
        "simulator" | "sim" => Ok(QaoaSimulator::new()),
        "noisy" | "noisy-sim" => {
            if !(0.0..=1.0).contains(&noise) {
                anyhow::bail!("Noise strength must be in [0, 1], got {noise}");
            }
            Ok(QaoaSimulator::new()
                .with_name("noisy")
                .with_depolarizing(noise))
        }
        other => {
            anyhow::bail!("Unknown backend: '{other}'. Available: simulator, noisy");
        }
    }
}

/// Print `value` as JSON to stdout, or write it to `output`.
pub fn emit_json<T: serde::Serialize>(value: &T, output: Option<&str>) -> Result<()> {
    let config = ExportConfig::default();
    match output {
        Some(path) => {
            export::to_file(value, Path::new(path), &config)?;
            eprintln!(
                "{} Written to {}",
                console::style("OK").green().bold(),
                path
            );
        }
        None => println!("{}", export::to_json(value, &config)?),
    }
    Ok(())
}

/// A steady-ticking spinner on stderr.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(spinner)
}
