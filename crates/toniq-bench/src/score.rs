//! Score curves and scorers.
//!
//! A [`ScoreCurve`] is the empirical cumulative distribution of accuracy
//! samples collected on an ideal backend, sampled at `bins + 1` uniform
//! positions on `[0, 1]`. A [`Scorer`] interpolates that curve linearly so an
//! accuracy observed on real hardware maps to the fraction of ideal runs that
//! did no better.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BenchError, BenchResult};

/// Default number of histogram bins.
pub const DEFAULT_BIN_COUNT: usize = 200;

/// Cumulative distribution of accuracy samples over equal-width bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct ScoreCurve {
    bin_count: usize,
    values: Vec<f64>,
}

/// Unchecked serialized form of a [`ScoreCurve`].
#[derive(Deserialize)]
struct RawCurve {
    bin_count: usize,
    values: Vec<f64>,
}

impl TryFrom<RawCurve> for ScoreCurve {
    type Error = BenchError;

    fn try_from(raw: RawCurve) -> BenchResult<Self> {
        Self::from_values(raw.bin_count, raw.values)
    }
}

impl ScoreCurve {
    /// Rebuild a curve from stored values, checking its shape.
    pub fn from_values(bin_count: usize, values: Vec<f64>) -> BenchResult<Self> {
        if bin_count == 0 || values.len().checked_sub(1) != Some(bin_count) {
            return Err(BenchError::InvalidInput(format!(
                "curve with {bin_count} bins cannot have {} values",
                values.len()
            )));
        }
        if values[0] != 0.0 {
            return Err(BenchError::InvalidInput("curve must start at 0".into()));
        }
        if values.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(BenchError::InvalidInput("curve values must lie in [0, 1]".into()));
        }
        if values.windows(2).any(|w| w[0] > w[1]) {
            return Err(BenchError::InvalidInput("curve must be non-decreasing".into()));
        }
        Ok(Self { bin_count, values })
    }

    /// Histogram `samples` into `bin_count` bins on `[0, 1]` and accumulate.
    ///
    /// Bins are half-open except the last one, which includes 1. Samples
    /// outside `[0, 1]` still count toward the total, so the curve then ends
    /// below 1.
    pub fn from_samples(samples: &[f64], bin_count: usize) -> BenchResult<Self> {
        if bin_count == 0 {
            return Err(BenchError::InvalidInput("bin count must be at least 1".into()));
        }
        if samples.is_empty() {
            return Err(BenchError::InsufficientData(
                "cannot build a score curve from an empty sample set".into(),
            ));
        }
        if samples.iter().any(|s| s.is_nan()) {
            return Err(BenchError::InvalidInput("accuracy samples contain NaN".into()));
        }

        let mut counts = vec![0usize; bin_count];
        let mut outside = 0usize;
        for &sample in samples {
            match bin_of(sample, bin_count) {
                Some(bin) => counts[bin] += 1,
                None => outside += 1,
            }
        }
        if outside > 0 {
            warn!("{outside} of {} accuracy samples fall outside [0, 1]", samples.len());
        }

        let total = samples.len() as f64;
        let mut values = Vec::with_capacity(bin_count + 1);
        values.push(0.0);
        let mut cumulative = 0usize;
        for count in counts {
            cumulative += count;
            values.push(cumulative as f64 / total);
        }

        debug!("Built score curve from {} samples over {bin_count} bins", samples.len());
        Ok(Self { bin_count, values })
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// The `bin_count + 1` cumulative values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the curve, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// The x-position of control point `i`.
    pub fn x(&self, i: usize) -> f64 {
        edge(i, self.bin_count)
    }
}

/// Left edge of bin `i`, i.e. `i / bin_count`.
fn edge(i: usize, bin_count: usize) -> f64 {
    i as f64 / bin_count as f64
}

/// Index of the segment `[edge(k), edge(k + 1))` containing `x`, with the
/// last segment closed. `None` if `x` lies outside `[0, 1]`.
fn bin_of(x: f64, bin_count: usize) -> Option<usize> {
    if !(0.0..=1.0).contains(&x) {
        return None;
    }

    let mut k = ((x * bin_count as f64) as usize).min(bin_count - 1);
    // x * bin_count can round across an edge; correct against the edges themselves.
    if x < edge(k, bin_count) {
        k -= 1;
    } else if k + 1 < bin_count && x >= edge(k + 1, bin_count) {
        k += 1;
    }
    Some(k)
}

/// Piecewise-linear scoring function over a [`ScoreCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorer {
    curve: ScoreCurve,
}

impl Scorer {
    /// Wrap an existing curve.
    pub fn from_curve(curve: ScoreCurve) -> Self {
        Self { curve }
    }

    /// The control points.
    pub fn curve(&self) -> &ScoreCurve {
        &self.curve
    }

    /// Score an observed accuracy `x ∈ [0, 1]`.
    ///
    /// Returns the curve value exactly at control points and interpolates
    /// linearly in between. There is no extrapolation.
    pub fn score(&self, x: f64) -> BenchResult<f64> {
        let bins = self.curve.bin_count;
        let k = bin_of(x, bins).ok_or(BenchError::OutOfRange(x))?;

        let (x0, x1) = (edge(k, bins), edge(k + 1, bins));
        let (y0, y1) = (self.curve.values[k], self.curve.values[k + 1]);
        if x == x0 {
            return Ok(y0);
        }
        if x == x1 {
            return Ok(y1);
        }
        Ok(y0 + (x - x0) / (x1 - x0) * (y1 - y0))
    }
}

/// Build the reference curve with [`DEFAULT_BIN_COUNT`] bins.
pub fn build_reference_curve(samples: &[f64]) -> BenchResult<ScoreCurve> {
    ScoreCurve::from_samples(samples, DEFAULT_BIN_COUNT)
}

/// Build the reference curve with a custom bin count.
pub fn build_reference_curve_with_bins(
    samples: &[f64],
    bin_count: usize,
) -> BenchResult<ScoreCurve> {
    ScoreCurve::from_samples(samples, bin_count)
}

/// Build a scorer with [`DEFAULT_BIN_COUNT`] bins.
pub fn build_scorer(samples: &[f64]) -> BenchResult<Scorer> {
    build_scorer_with_bins(samples, DEFAULT_BIN_COUNT)
}

/// Build a scorer with a custom bin count.
pub fn build_scorer_with_bins(samples: &[f64], bin_count: usize) -> BenchResult<Scorer> {
    ScoreCurve::from_samples(samples, bin_count).map(Scorer::from_curve)
}
