// Latency samples and the two-slot baseline/candidate pairing
//
// Groups are assigned to their slot once, when the input is parsed; the
// comparison never looks at labels to decide which side is which.

use crate::error::{AbError, Result};

/// An ordered, non-empty, immutable sequence of non-negative latencies
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Build a sample, rejecting empty input and non-finite or negative values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(AbError::InvalidSample(
                "sample must contain at least one value".to_string(),
            ));
        }

        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(AbError::InvalidSample(format!(
                "value #{} ({}) is not a finite non-negative number",
                index + 1,
                value
            )));
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Sample variance (n - 1 divisor); `None` for a single observation
    pub fn variance(&self) -> Option<f64> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }
        let mean = self.mean();
        let sum_sq = self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        Some(sum_sq / (n - 1) as f64)
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// A labelled sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGroup {
    pub label: String,
    pub sample: Sample,
}

impl SampleGroup {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        Ok(Self {
            label: label.into(),
            sample: Sample::new(values)?,
        })
    }
}

/// The two groups of one comparison
///
/// `baseline` is the "old" variant (A), `candidate` the "new" one (B).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGroups {
    pub baseline: SampleGroup,
    pub candidate: SampleGroup,
}

impl SampleGroups {
    pub fn new(baseline: SampleGroup, candidate: SampleGroup) -> Self {
        Self {
            baseline,
            candidate,
        }
    }

    /// True when both groups hold the same number of observations
    pub fn counts_match(&self) -> bool {
        self.baseline.sample.len() == self.candidate.sample.len()
    }
}
