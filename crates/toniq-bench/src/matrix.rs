//! QUBO problem instances.
//!
//! A [`QuboMatrix`] is a square, symmetric, real-valued matrix `M` encoding
//! the objective `x^T M x` over binary vectors `x`. Instances are immutable
//! once constructed: either drawn at random by [`generate_matrix`] or
//! validated from user data by [`QuboMatrix::from_rows`].

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BenchError, BenchResult};

/// Absolute tolerance used when validating symmetry of user-supplied matrices.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Default lower bound for random matrix elements.
pub const DEFAULT_LOWER: f64 = 0.0;

/// Default upper bound for random matrix elements.
pub const DEFAULT_UPPER: f64 = 10.0;

/// A symmetric QUBO matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct QuboMatrix {
    data: Array2<f64>,
}

impl QuboMatrix {
    /// Build a matrix from rows, checking shape, finiteness and symmetry.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> BenchResult<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(BenchError::InvalidInput("matrix is empty".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(BenchError::InvalidInput(format!(
                "matrix is not square: row {i} has {} entries, expected {dim}",
                row.len()
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        if flat.iter().any(|v| !v.is_finite()) {
            return Err(BenchError::InvalidInput(
                "matrix contains non-finite entries".into(),
            ));
        }
        let data = Array2::from_shape_vec((dim, dim), flat)
            .map_err(|e| BenchError::InvalidInput(e.to_string()))?;

        for i in 0..dim {
            for j in (i + 1)..dim {
                if (data[[i, j]] - data[[j, i]]).abs() > SYMMETRY_TOLERANCE {
                    return Err(BenchError::InvalidInput(format!(
                        "matrix is not symmetric: M[{i}][{j}] = {} but M[{j}][{i}] = {}",
                        data[[i, j]],
                        data[[j, i]]
                    )));
                }
            }
        }

        Ok(Self { data })
    }

    /// Number of binary variables (qubits).
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    /// Element access.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[[i, j]]
    }

    /// The underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Copy the matrix out as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Energy `x^T M x` of the binary vector encoded by `index`.
    ///
    /// Bit `i` of `index` is component `i` of `x`.
    pub fn energy(&self, index: u64) -> f64 {
        // Variables beyond bit 63 are never set in a u64 index.
        let bits = self.dim().min(u64::BITS as usize);
        let ones: Vec<usize> = (0..bits).filter(|&i| (index >> i) & 1 == 1).collect();
        let mut energy = 0.0;
        for &i in &ones {
            for &j in &ones {
                energy += self.data[[i, j]];
            }
        }
        energy
    }

    /// Variance of the normalized covariance terms
    /// `M[i][j] / sqrt(M[i][i] * M[j][j])` over the lower triangle `i >= j`.
    ///
    /// Fails with [`BenchError::Domain`] when a diagonal product is not
    /// strictly positive.
    pub fn hardness(&self) -> BenchResult<f64> {
        let dim = self.dim();
        let mut terms = Vec::with_capacity(dim * (dim + 1) / 2);
        for i in 0..dim {
            for j in 0..=i {
                let scale = self.data[[i, i]] * self.data[[j, j]];
                if scale <= 0.0 {
                    return Err(BenchError::Domain(format!(
                        "hardness undefined: M[{i}][{i}] * M[{j}][{j}] = {scale} is not positive"
                    )));
                }
                terms.push(self.data[[i, j]] / scale.sqrt());
            }
        }

        let n = terms.len() as f64;
        let mean = terms.iter().sum::<f64>() / n;
        Ok(terms.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n)
    }
}

impl TryFrom<Vec<Vec<f64>>> for QuboMatrix {
    type Error = BenchError;

    fn try_from(rows: Vec<Vec<f64>>) -> BenchResult<Self> {
        Self::from_rows(rows)
    }
}

impl From<QuboMatrix> for Vec<Vec<f64>> {
    fn from(matrix: QuboMatrix) -> Self {
        matrix.to_rows()
    }
}

/// Generate a random symmetric matrix using the thread-local RNG.
pub fn generate_matrix(dim: usize, lower: f64, upper: f64) -> BenchResult<QuboMatrix> {
    generate_with_rng(dim, lower, upper, &mut rand::thread_rng())
}

/// Generate a random symmetric matrix from a fixed seed.
pub fn generate_matrix_seeded(
    dim: usize,
    lower: f64,
    upper: f64,
    seed: u64,
) -> BenchResult<QuboMatrix> {
    generate_with_rng(dim, lower, upper, &mut SmallRng::seed_from_u64(seed))
}

/// Draw `dim * dim` uniform samples in `[lower, upper]` and mirror the upper
/// triangle (diagonal included) onto the lower triangle.
///
/// The hardness of the instance is logged; a matrix whose hardness is
/// undefined is rejected with [`BenchError::Domain`].
pub fn generate_with_rng<R: Rng>(
    dim: usize,
    lower: f64,
    upper: f64,
    rng: &mut R,
) -> BenchResult<QuboMatrix> {
    if dim == 0 {
        return Err(BenchError::InvalidInput("dimension must be at least 1".into()));
    }
    if !lower.is_finite() || !upper.is_finite() {
        return Err(BenchError::InvalidInput(format!(
            "bounds must be finite, got [{lower}, {upper}]"
        )));
    }
    if lower > upper {
        return Err(BenchError::InvalidInput(format!(
            "lower bound {lower} exceeds upper bound {upper}"
        )));
    }

    let samples: Vec<f64> = (0..dim * dim)
        .map(|_| rng.gen_range(lower..=upper))
        .collect();
    let mut data = Array2::from_shape_vec((dim, dim), samples)
        .map_err(|e| BenchError::InvalidInput(e.to_string()))?;
    for i in 0..dim {
        for j in 0..i {
            data[[i, j]] = data[[j, i]];
        }
    }

    let matrix = QuboMatrix { data };
    let hardness = matrix.hardness()?;
    info!("the hardness is {hardness}");
    debug!("Generated {dim}x{dim} matrix in [{lower}, {upper}]");

    Ok(matrix)
}
