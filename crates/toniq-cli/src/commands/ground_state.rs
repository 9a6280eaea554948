//! Ground-state command implementation.

use anyhow::Result;
use console::style;

use toniq_bench::solve_ground_state;

use super::common::load_matrix;

/// Execute the ground-state command.
pub fn execute(input: &str) -> Result<()> {
    let matrix = load_matrix(input)?;
    let gs = solve_ground_state(&matrix)?;

    println!("{}", style("Ground State").bold().underlined());
    println!("  Bitstring: {}", style(&gs.bitstring).cyan());
    println!("  Index:     {}", gs.index);
    println!("  Energy:    {}", gs.energy);

    Ok(())
}
