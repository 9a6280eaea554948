//! Score command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use toniq_bench::export;
use toniq_bench::{ScoreCurve, Scorer};

/// Execute the score command.
pub fn execute(curve: &str, accuracy: f64) -> Result<()> {
    let curve: ScoreCurve = export::from_file(Path::new(curve))
        .with_context(|| format!("Failed to load score curve: {curve}"))?;
    let scorer = Scorer::from_curve(curve);
    let score = scorer.score(accuracy)?;

    println!(
        "{} accuracy {accuracy} -> score {}",
        style("Toniq").cyan().bold(),
        style(format!("{score:.4}")).green().bold()
    );

    Ok(())
}
