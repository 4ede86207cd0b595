// The three verdict checks
//
// Each check is independent, records its reasoning in the report, and
// returns a boolean outcome. None of them return errors: a check that
// cannot run (too few samples, degenerate data) decides pass/fail itself
// and says why.
//
// - Variance sufficiency: each group's confidence interval must be narrow
//   relative to its mean, otherwise the run is too noisy to judge.
// - Mean regression: Welch's t-test (unequal variances) between candidate
//   and baseline, in f64 with the p-value from statrs' Student's t.
// - Tail: reserved for a 99th percentile comparison, currently a no-op.

use crate::comparison::config::AnalysisConfig;
use crate::comparison::interval::{group_interval, MIN_SAMPLES};
use crate::comparison::report::Report;
use crate::comparison::sample::{Sample, SampleGroup, SampleGroups};
use crate::error::AbError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Identifies a check in outcomes and JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Variance,
    Mean,
    Tail,
}

/// Pass/fail result of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub passed: bool,
}

/// Result of Welch's two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTest {
    /// t-statistic (candidate minus baseline)
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,
}

/// What the mean check concluded about the candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeanShift {
    /// p >= alpha: no evidence of any change
    NotSignificant,
    /// Significant and slower; percent relative to the baseline mean,
    /// `None` when the baseline mean is zero
    Regression { percent: Option<f64> },
    /// Significant and not slower; percent relative to the baseline mean
    Improvement { percent: Option<f64> },
    /// The test could not be run
    Inconclusive { reason: String },
}

/// Mean check outcome with the statistics behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanCheck {
    pub outcome: CheckOutcome,
    pub shift: MeanShift,
    pub test: Option<WelchTest>,
}

/// Run Welch's t-test on (candidate, baseline)
///
/// Zero variance in both groups leaves the statistic undefined; the
/// result then carries NaN, which the mean check reads as "not
/// significant".
///
/// # Example
/// ```
/// use abstats::comparison::{welch_t_test, Sample};
///
/// let old = Sample::new(vec![10.0, 12.0, 11.0, 13.0, 10.0]).unwrap();
/// let new = Sample::new(vec![25.0, 27.0, 26.0, 28.0, 25.0]).unwrap();
///
/// let result = welch_t_test(&new, &old).unwrap();
/// assert!(result.p_value < 0.05);
/// assert!(result.statistic > 0.0);
/// ```
pub fn welch_t_test(candidate: &Sample, baseline: &Sample) -> Result<WelchTest> {
    let (Some(var_candidate), Some(var_baseline)) = (candidate.variance(), baseline.variance())
    else {
        anyhow::bail!("Need at least 2 samples per group for t-test");
    };

    let n_candidate = candidate.len() as f64;
    let n_baseline = baseline.len() as f64;
    let se_candidate = var_candidate / n_candidate;
    let se_baseline = var_baseline / n_baseline;

    let standard_error = (se_candidate + se_baseline).sqrt();
    if standard_error == 0.0 {
        return Ok(WelchTest {
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: f64::NAN,
        });
    }

    let statistic = (candidate.mean() - baseline.mean()) / standard_error;

    // Welch-Satterthwaite
    let df = (se_candidate + se_baseline).powi(2)
        / (se_candidate.powi(2) / (n_candidate - 1.0) + se_baseline.powi(2) / (n_baseline - 1.0));

    let distribution =
        StudentsT::new(0.0, 1.0, df).context("Failed to build Student's t distribution")?;
    let p_value = (2.0 * distribution.sf(statistic.abs())).min(1.0);

    Ok(WelchTest {
        statistic,
        p_value,
        df,
    })
}

/// Fail when either group's interval is too wide relative to its mean
pub fn check_variance(
    groups: &SampleGroups,
    config: &AnalysisConfig,
    report: &mut Report,
) -> CheckOutcome {
    let fail = CheckOutcome {
        kind: CheckKind::Variance,
        passed: false,
    };

    for group in [&groups.baseline, &groups.candidate] {
        if group.sample.len() < MIN_SAMPLES {
            let reason = AbError::InsufficientSamples {
                group: group.label.clone(),
                required: MIN_SAMPLES,
                actual: group.sample.len(),
            };
            report.error(format!("Insufficient samples to check variance ({})", reason));
            return fail;
        }
    }

    let mut passed = true;
    for group in [&groups.baseline, &groups.candidate] {
        if !interval_within_limit(group, config, report) {
            passed = false;
        }
    }

    CheckOutcome {
        kind: CheckKind::Variance,
        passed,
    }
}

fn interval_within_limit(
    group: &SampleGroup,
    config: &AnalysisConfig,
    report: &mut Report,
) -> bool {
    let interval = match group_interval(group, config.confidence) {
        Ok(interval) => interval,
        Err(e) => {
            report.error(format!("Insufficient samples to check variance ({})", e));
            return false;
        }
    };

    let relative = interval.relative_width();
    tracing::debug!(
        group = %group.label,
        mean = interval.mean,
        half_width = interval.half_width,
        relative,
        "confidence interval"
    );

    if interval.half_width > interval.mean * config.max_interval_percent {
        report.error(format!(
            "confidence interval width for {} ({:.1}%) is more than {:.1}% of μ",
            group.label,
            100.0 * relative,
            100.0 * config.max_interval_percent
        ));
        return false;
    }

    report.debug(format!(
        "confidence interval width for {} is {:.1}% of μ",
        group.label,
        100.0 * relative
    ));
    true
}

/// Fail only on a statistically significant slowdown of the candidate
pub fn check_mean(groups: &SampleGroups, config: &AnalysisConfig, report: &mut Report) -> MeanCheck {
    let baseline = &groups.baseline.sample;
    let candidate = &groups.candidate.sample;
    let alpha = config.significance_level();

    let test = match welch_t_test(candidate, baseline) {
        Ok(test) => test,
        Err(e) => {
            tracing::warn!("Failed to compare distributions: {:#}", e);
            report.debug(format!("mean comparison skipped: {:#}", e));
            return MeanCheck {
                outcome: CheckOutcome {
                    kind: CheckKind::Mean,
                    passed: true,
                },
                shift: MeanShift::Inconclusive {
                    reason: format!("{:#}", e),
                },
                test: None,
            };
        }
    };

    tracing::debug!(
        statistic = test.statistic,
        p_value = test.p_value,
        df = test.df,
        alpha,
        "welch t-test"
    );

    let (passed, shift) = classify_shift(
        test.p_value,
        alpha,
        baseline.mean(),
        candidate.mean(),
        report,
    );

    MeanCheck {
        outcome: CheckOutcome {
            kind: CheckKind::Mean,
            passed,
        },
        shift,
        test: Some(test),
    }
}

/// Decide the mean shift from a p-value and both means
///
/// A NaN p-value compares false and is treated as "not significant".
/// Only a significant slowdown fails.
pub fn classify_shift(
    p_value: f64,
    alpha: f64,
    old_mean: f64,
    new_mean: f64,
    report: &mut Report,
) -> (bool, MeanShift) {
    if p_value.is_nan() || p_value >= alpha {
        report.debug("execution had too much variance to make conclusion");
        return (true, MeanShift::NotSignificant);
    }

    if new_mean > old_mean {
        let percent = percent_of_baseline(new_mean - old_mean, old_mean);
        match percent {
            Some(percent) => report.error(format!("execution regressed by {:.1}%", percent)),
            None => report.error("execution regressed from a zero baseline"),
        }
        return (false, MeanShift::Regression { percent });
    }

    if new_mean == old_mean {
        report.error(format!(
            "Means equal with significant p value ({:.6})",
            p_value
        ));
    }

    let percent = percent_of_baseline(old_mean - new_mean, old_mean);
    match percent {
        Some(percent) => report.success(format!("execution improved by {:.1}%", percent)),
        None => report.success("execution improved from a zero baseline"),
    }
    (true, MeanShift::Improvement { percent })
}

fn percent_of_baseline(delta: f64, old_mean: f64) -> Option<f64> {
    (old_mean > 0.0).then(|| delta / old_mean * 100.0)
}

/// 99th percentile comparison; not implemented, always passes
pub fn check_tail(_groups: &SampleGroups, _config: &AnalysisConfig) -> CheckOutcome {
    CheckOutcome {
        kind: CheckKind::Tail,
        passed: true,
    }
}
