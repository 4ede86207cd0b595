// A/B comparison pipeline
//
// 1. Report: mean±interval and an aligned histogram per group (never fails)
// 2. Variance sufficiency check
// 3. Mean regression check (Welch's t-test)
// 4. Tail check (no-op)
//
// All three checks always run so the report shows every failure, and the
// verdict is their conjunction. The function is pure: identical inputs
// give an identical outcome, report text included.

use crate::comparison::checks::{
    check_mean, check_tail, check_variance, CheckOutcome, MeanCheck,
};
use crate::comparison::config::AnalysisConfig;
use crate::comparison::histogram::{Histogram, HistogramRange};
use crate::comparison::interval::{format_mean, half_width};
use crate::comparison::report::{LineRole, Report, Severity};
use crate::comparison::sample::{SampleGroup, SampleGroups};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Descriptive summary of one group as shown in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    /// `None` when the group has a single observation
    pub half_width: Option<f64>,
    pub histogram: String,
}

/// Everything a comparison produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    /// True iff every check passed
    pub verdict: bool,
    pub unit: String,
    pub baseline: GroupSummary,
    pub candidate: GroupSummary,
    pub range: HistogramBounds,
    pub checks: Vec<CheckOutcome>,
    pub mean_check: MeanCheck,
    pub report: Report,
}

/// Shared histogram bounds (`high` is the displayed right edge)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBounds {
    pub low: f64,
    pub high: f64,
    pub buckets: usize,
}

impl ComparisonOutcome {
    /// Plain report text including debug lines
    pub fn report_text(&self) -> String {
        self.report.to_report_string(Severity::Debug)
    }
}

/// Compare candidate against baseline and decide pass/fail
///
/// # Example
/// ```
/// use abstats::comparison::{compare, AnalysisConfig, SampleGroup, SampleGroups};
///
/// let groups = SampleGroups::new(
///     SampleGroup::new("old", vec![100.0, 101.0, 99.0, 100.0, 102.0]).unwrap(),
///     SampleGroup::new("new", vec![130.0, 131.0, 129.0, 130.0, 132.0]).unwrap(),
/// );
///
/// let outcome = compare(&groups, "ms", &AnalysisConfig::default()).unwrap();
/// assert!(!outcome.verdict); // ~30% slower
/// ```
pub fn compare(
    groups: &SampleGroups,
    unit: &str,
    config: &AnalysisConfig,
) -> Result<ComparisonOutcome> {
    config.validate()?;

    let mut report = Report::new();

    // Step 1: descriptive report on a shared scale
    let (baseline, candidate, range) = summarize(groups, unit, config, &mut report);

    // Steps 2-4: every check runs, even after a failure
    let variance = check_variance(groups, config, &mut report);
    let mean_check = check_mean(groups, config, &mut report);
    let tail = check_tail(groups, config);

    let checks = vec![variance, mean_check.outcome, tail];
    let verdict = checks.iter().all(|c| c.passed);

    tracing::debug!(
        baseline = %groups.baseline.label,
        candidate = %groups.candidate.label,
        verdict,
        "comparison finished"
    );

    Ok(ComparisonOutcome {
        verdict,
        unit: unit.to_string(),
        baseline,
        candidate,
        range,
        checks,
        mean_check,
        report,
    })
}

fn summarize(
    groups: &SampleGroups,
    unit: &str,
    config: &AnalysisConfig,
    report: &mut Report,
) -> (GroupSummary, GroupSummary, HistogramBounds) {
    let buckets = config.histogram_buckets;
    let range = HistogramRange::shared(
        &groups.baseline.sample,
        &groups.candidate.sample,
        buckets,
    );

    let old_hist = Histogram::build(&groups.baseline.sample, range, buckets);
    let new_hist = Histogram::build(&groups.candidate.sample, range, buckets);

    let old_mean = format_mean(&groups.baseline.sample, config.confidence, unit);
    let new_mean = format_mean(&groups.candidate.sample, config.confidence, unit);

    let name_width = groups
        .baseline
        .label
        .chars()
        .count()
        .max(groups.candidate.label.chars().count());
    let mean_width = old_mean.chars().count().max(new_mean.chars().count());

    let old_hist_text = old_hist.render(unit);
    let new_hist_text = new_hist.render(unit);

    report.push(
        Severity::Info,
        LineRole::Baseline,
        format!(
            "{:<name_width$} execution time   : {:<mean_width$} : {}",
            groups.baseline.label, old_mean, old_hist_text
        ),
    );
    report.push(
        Severity::Info,
        LineRole::Candidate,
        format!(
            "{:<name_width$} execution time   : {:<mean_width$} : {}",
            groups.candidate.label, new_mean, new_hist_text
        ),
    );

    let bounds = HistogramBounds {
        low: range.low,
        high: old_hist.right_edge(),
        buckets,
    };

    (
        group_summary(&groups.baseline, config, old_hist_text),
        group_summary(&groups.candidate, config, new_hist_text),
        bounds,
    )
}

fn group_summary(group: &SampleGroup, config: &AnalysisConfig, histogram: String) -> GroupSummary {
    GroupSummary {
        label: group.label.clone(),
        count: group.sample.len(),
        mean: group.sample.mean(),
        half_width: half_width(&group.sample, config.confidence).ok(),
        histogram,
    }
}
