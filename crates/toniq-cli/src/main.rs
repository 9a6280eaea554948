//! Toniq Command-Line Interface
//!
//! Generates QUBO instances, solves their ground states, builds reference
//! score curves on the local simulator and scores backends against them.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{bench, ground_state, matrix, reference, score, version};

/// Toniq - score QAOA performance on quantum backends
#[derive(Parser)]
#[command(name = "toniq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random symmetric QUBO matrix
    Matrix {
        /// Number of binary variables
        #[arg(short, long)]
        dim: usize,

        /// Lower bound of matrix elements
        #[arg(long, default_value = "0.0")]
        lower: f64,

        /// Upper bound of matrix elements
        #[arg(long, default_value = "10.0")]
        upper: f64,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Find the ground state of a matrix by exhaustive search
    GroundState {
        /// Input matrix (JSON list of rows)
        #[arg(short, long)]
        input: String,
    },

    /// Build a reference score curve on the local simulator
    Reference {
        /// Input matrix (JSON list of rows)
        #[arg(short, long)]
        input: String,

        /// Number of QAOA layers
        #[arg(short, long, default_value = "1")]
        layers: u32,

        /// Number of QAOA repetitions
        #[arg(short, long, default_value = "200")]
        reps: u32,

        /// Number of histogram bins
        #[arg(long, default_value = "200")]
        bins: usize,

        /// Optimizer iterations per repetition
        #[arg(long, default_value = "100")]
        max_iterations: u32,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON file for the curve (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Score an observed accuracy against a reference curve
    Score {
        /// Reference curve (JSON)
        #[arg(short, long)]
        curve: String,

        /// Observed ground-state probability in [0, 1]
        #[arg(short, long)]
        accuracy: f64,
    },

    /// Run the full benchmark: ideal simulator reference vs. a target backend
    Bench {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Number of binary variables (overrides config)
        #[arg(short, long)]
        dim: Option<usize>,

        /// Number of QAOA layers (overrides config)
        #[arg(short, long)]
        layers: Option<u32>,

        /// Seed for matrix generation and sampling (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Target backend (simulator, noisy)
        #[arg(short, long, default_value = "noisy")]
        backend: String,

        /// Depolarizing strength of the noisy backend
        #[arg(long, default_value = "0.05")]
        noise: f64,

        /// Output JSON file for the result (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Matrix {
            dim,
            lower,
            upper,
            seed,
            output,
        } => matrix::execute(dim, lower, upper, seed, output.as_deref()),

        Commands::GroundState { input } => ground_state::execute(&input),

        Commands::Reference {
            input,
            layers,
            reps,
            bins,
            max_iterations,
            seed,
            output,
        } => {
            reference::execute(
                &input,
                layers,
                reps,
                bins,
                max_iterations,
                seed,
                output.as_deref(),
            )
            .await
        }

        Commands::Score { curve, accuracy } => score::execute(&curve, accuracy),

        Commands::Bench {
            config,
            dim,
            layers,
            seed,
            backend,
            noise,
            output,
        } => {
            bench::execute(
                config.as_deref(),
                dim,
                layers,
                seed,
                &backend,
                noise,
                output.as_deref(),
            )
            .await
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
