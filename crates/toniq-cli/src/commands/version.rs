//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - QAOA benchmark scoring for quantum backends",
        style("Toniq").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  toniq-bench        Matrices, ground states, score curves");
    println!("  toniq-adapter-sim  Local statevector QAOA sampler");
    println!("  toniq-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
