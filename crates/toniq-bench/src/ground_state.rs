//! Exhaustive ground-state search.
//!
//! Enumerates all `2^n` binary vectors of a [`QuboMatrix`] and keeps the one
//! minimizing `x^T M x`. The cost is `O(2^n · n^2)`, so this is only meant as
//! ground truth for small instances.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{BenchError, BenchResult};
use crate::matrix::QuboMatrix;

/// Largest matrix dimension accepted by [`solve_ground_state`].
pub const MAX_GROUND_STATE_DIM: usize = 24;

/// The minimal-energy assignment of a QUBO matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundState {
    /// Binary assignment; character `i` is component `i`.
    pub bitstring: String,
    /// Decimal index; bit `i` is component `i`.
    pub index: u64,
    /// Energy `x^T M x` of the assignment.
    pub energy: f64,
}

impl GroundState {
    fn new(index: u64, dim: usize, energy: f64) -> Self {
        Self {
            bitstring: index_to_bitstring(index, dim),
            index,
            energy,
        }
    }
}

/// Render an index as a little-endian bitstring of length `dim`.
pub fn index_to_bitstring(index: u64, dim: usize) -> String {
    (0..dim)
        .map(|i| if (index >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Find the ground state of `matrix`.
///
/// Ties are broken in favour of the smallest index.
#[instrument(skip(matrix), fields(dim = matrix.dim()))]
pub fn solve_ground_state(matrix: &QuboMatrix) -> BenchResult<GroundState> {
    let dim = matrix.dim();
    if dim > MAX_GROUND_STATE_DIM {
        return Err(BenchError::InvalidInput(format!(
            "exhaustive search supports at most {MAX_GROUND_STATE_DIM} variables, got {dim}"
        )));
    }

    let m = matrix.as_array();
    let mut best_index = 0u64;
    let mut best_energy = 0.0;
    let mut ones = Vec::with_capacity(dim);

    // Index 0 (all zeros) always has energy 0 and seeds the search.
    for index in 1..(1u64 << dim) {
        ones.clear();
        ones.extend((0..dim).filter(|&i| (index >> i) & 1 == 1));

        let mut energy = 0.0;
        for &i in &ones {
            for &j in &ones {
                energy += m[[i, j]];
            }
        }

        if energy < best_energy {
            best_energy = energy;
            best_index = index;
        }
    }

    debug!("Ground state index {best_index} with energy {best_energy}");
    Ok(GroundState::new(best_index, dim, best_energy))
}

/// Validate raw rows as a symmetric matrix and find its ground state.
pub fn solve_ground_state_rows(rows: &[Vec<f64>]) -> BenchResult<GroundState> {
    let matrix = QuboMatrix::from_rows(rows.to_vec())?;
    solve_ground_state(&matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_diagonal_ground_state() {
        let m = QuboMatrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let gs = solve_ground_state(&m).unwrap();
        assert_eq!(gs.index, 0);
        assert_eq!(gs.bitstring, "00");
        assert_eq!(gs.energy, 0.0);
    }

    #[test]
    fn test_negative_entry_selected() {
        // Only x = (0, 1) has negative energy.
        let m = QuboMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, -1.0]]).unwrap();
        let gs = solve_ground_state(&m).unwrap();
        assert_eq!(gs.index, 2);
        assert_eq!(gs.bitstring, "01");
        assert_eq!(gs.energy, -1.0);
    }

    #[test]
    fn test_tie_prefers_smallest_index() {
        // Indices 1 and 2 both have energy -1.
        let m = QuboMatrix::from_rows(vec![vec![-1.0, 5.0], vec![5.0, -1.0]]).unwrap();
        let gs = solve_ground_state(&m).unwrap();
        assert_eq!(gs.index, 1);
        assert_eq!(gs.energy, -1.0);
    }

    #[test]
    fn test_tie_with_zero_vector() {
        let m = QuboMatrix::from_rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(solve_ground_state(&m).unwrap().index, 0);
    }

    #[test]
    fn test_all_ones_ground_state() {
        let m = QuboMatrix::from_rows(vec![
            vec![-1.0, -1.0, -1.0],
            vec![-1.0, -1.0, -1.0],
            vec![-1.0, -1.0, -1.0],
        ])
        .unwrap();
        let gs = solve_ground_state(&m).unwrap();
        assert_eq!(gs.index, 7);
        assert_eq!(gs.bitstring, "111");
        assert_eq!(gs.energy, -9.0);
    }

    #[test]
    fn test_rows_validation() {
        let ragged = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(matches!(
            solve_ground_state_rows(&ragged),
            Err(BenchError::InvalidInput(_))
        ));

        let asymmetric = vec![vec![1.0, 2.0], vec![0.0, 1.0]];
        assert!(matches!(
            solve_ground_state_rows(&asymmetric),
            Err(BenchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dimension_ceiling() {
        let rows = vec![vec![0.0; MAX_GROUND_STATE_DIM + 1]; MAX_GROUND_STATE_DIM + 1];
        let m = QuboMatrix::from_rows(rows).unwrap();
        assert!(matches!(
            solve_ground_state(&m),
            Err(BenchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_index_to_bitstring() {
        assert_eq!(index_to_bitstring(0b011, 3), "110");
        assert_eq!(index_to_bitstring(0, 4), "0000");
    }
}
