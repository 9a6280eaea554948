//! Matrix command implementation.

use anyhow::Result;
use console::style;

use toniq_bench::{generate_matrix, generate_matrix_seeded};

use super::common::emit_json;

/// Execute the matrix command.
pub fn execute(
    dim: usize,
    lower: f64,
    upper: f64,
    seed: Option<u64>,
    output: Option<&str>,
) -> Result<()> {
    let matrix = match seed {
        Some(seed) => generate_matrix_seeded(dim, lower, upper, seed)?,
        None => generate_matrix(dim, lower, upper)?,
    };

    emit_json(&matrix, output)?;
    eprintln!(
        "  {} {dim}x{dim} in [{lower}, {upper}], hardness {:.6}",
        style("Matrix").bold(),
        matrix.hardness()?
    );

    Ok(())
}
