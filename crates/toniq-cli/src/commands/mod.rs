//! CLI command implementations.

pub mod bench;
pub mod common;
pub mod ground_state;
pub mod matrix;
pub mod reference;
pub mod score;
pub mod version;
