//! Toniq Local QAOA Sampler
//!
//! This crate provides a local statevector implementation of
//! [`toniq_bench::SamplingRunner`]. It serves as the ideal reference backend
//! of the benchmark and, with depolarizing noise enabled, as a stand-in for
//! noisy hardware.
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, exact output probabilities by default
//! - **Shot Sampling**: empirical frequencies when `shots` is set
//! - **Depolarizing Noise**: mixes each output with the uniform distribution
//!
//! Memory grows as `2^n`; the default limit is 20 qubits.
//!
//! # Example
//!
//! ```ignore
//! use toniq_adapter_sim::QaoaSimulator;
//! use toniq_bench::{BenchConfig, run_benchmark};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ideal = QaoaSimulator::new();
//!     let noisy = QaoaSimulator::new().with_name("noisy").with_depolarizing(0.1);
//!
//!     let result = run_benchmark(&ideal, &noisy, &BenchConfig::default()).await?;
//!     println!("score: {}", result.value);
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEPOLARIZING_OPTION, QaoaSimulator};
