//! Confidence interval estimation around the sample mean
//!
//! The half-width is the standard error of the mean scaled by the
//! two-sided Student's t critical value for `n - 1` degrees of freedom.

use crate::comparison::sample::{Sample, SampleGroup};
use crate::error::{AbError, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Minimum observations needed to estimate a variance
pub const MIN_SAMPLES: usize = 2;

/// Mean of a sample together with its confidence interval half-width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanInterval {
    pub mean: f64,
    pub half_width: f64,
}

impl MeanInterval {
    /// Half-width as a fraction of the mean
    ///
    /// Infinite when the mean is zero and the interval is not.
    pub fn relative_width(&self) -> f64 {
        if self.half_width == 0.0 {
            0.0
        } else {
            self.half_width / self.mean
        }
    }
}

/// Confidence interval half-width for `sample` at `confidence`
///
/// Fails with `InsufficientSamples` for a single observation instead of
/// dividing by zero.
pub fn half_width(sample: &Sample, confidence: f64) -> Result<f64> {
    let n = sample.len();
    let variance = sample.variance().ok_or(AbError::InsufficientSamples {
        group: "sample".to_string(),
        required: MIN_SAMPLES,
        actual: n,
    })?;

    let standard_error = (variance / n as f64).sqrt();
    Ok(standard_error * critical_value(n - 1, confidence)?)
}

/// Two-sided Student's t critical value `t_{(1+c)/2, df}`
pub fn critical_value(df: usize, confidence: f64) -> Result<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AbError::InvalidConfig(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )));
    }

    let distribution =
        StudentsT::new(0.0, 1.0, df as f64).map_err(|_| AbError::InsufficientSamples {
            group: "sample".to_string(),
            required: MIN_SAMPLES,
            actual: df + 1,
        })?;
    Ok(distribution.inverse_cdf((1.0 + confidence) / 2.0))
}

/// Arithmetic mean and confidence interval half-width of `sample`
pub fn mean_with_interval(sample: &Sample, confidence: f64) -> Result<MeanInterval> {
    Ok(MeanInterval {
        mean: sample.mean(),
        half_width: half_width(sample, confidence)?,
    })
}

/// Same as [`mean_with_interval`], naming the group in the error
pub fn group_interval(group: &SampleGroup, confidence: f64) -> Result<MeanInterval> {
    mean_with_interval(&group.sample, confidence).map_err(|e| match e {
        AbError::InsufficientSamples {
            required, actual, ..
        } => AbError::InsufficientSamples {
            group: group.label.clone(),
            required,
            actual,
        },
        other => other,
    })
}

/// Format `μ=<mean>±<half-width><unit>`, with `n/a` when no interval exists
pub fn format_mean(sample: &Sample, confidence: f64, unit: &str) -> String {
    match half_width(sample, confidence) {
        Ok(width) => format!("μ={:.2}±{:.2}{}", sample.mean(), width, unit),
        Err(_) => format!("μ={:.2}±n/a{}", sample.mean(), unit),
    }
}
