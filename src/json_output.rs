//! JSON output format for comparison results
//!
//! `--format json` emits one document per run for CI systems that want
//! the numbers rather than the rendered report.

use crate::comparison::{
    CheckKind, ComparisonOutcome, GroupSummary, MeanShift, ReportLine,
};
use serde::{Deserialize, Serialize};

/// Per-group summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonGroup {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    /// Confidence interval half-width (absent for a single observation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_width: Option<f64>,
    pub histogram: String,
}

impl From<&GroupSummary> for JsonGroup {
    fn from(summary: &GroupSummary) -> Self {
        Self {
            label: summary.label.clone(),
            count: summary.count,
            mean: summary.mean,
            half_width: summary.half_width,
            histogram: summary.histogram.clone(),
        }
    }
}

/// Outcome of one check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCheck {
    pub name: CheckKind,
    pub passed: bool,
}

/// Welch's t-test statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTTest {
    pub statistic: f64,
    pub p_value: f64,
    pub df: f64,
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version
    pub version: String,
    pub verdict: bool,
    pub unit: String,
    pub confidence: f64,
    pub baseline: JsonGroup,
    pub candidate: JsonGroup,
    pub checks: Vec<JsonCheck>,
    pub mean_shift: MeanShift,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_test: Option<JsonTTest>,
    /// Relative change of the candidate mean vs. baseline, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    pub report: Vec<ReportLine>,
}

impl JsonOutput {
    pub fn new(outcome: &ComparisonOutcome, confidence: f64) -> Self {
        let change_percent = match &outcome.mean_check.shift {
            MeanShift::Regression { percent } => *percent,
            MeanShift::Improvement { percent } => percent.map(|p| -p),
            MeanShift::NotSignificant | MeanShift::Inconclusive { .. } => None,
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            verdict: outcome.verdict,
            unit: outcome.unit.clone(),
            confidence,
            baseline: JsonGroup::from(&outcome.baseline),
            candidate: JsonGroup::from(&outcome.candidate),
            checks: outcome
                .checks
                .iter()
                .map(|c| JsonCheck {
                    name: c.kind,
                    passed: c.passed,
                })
                .collect(),
            mean_shift: outcome.mean_check.shift.clone(),
            t_test: outcome.mean_check.test.map(|t| JsonTTest {
                statistic: t.statistic,
                p_value: t.p_value,
                df: t.df,
            }),
            change_percent,
            report: outcome.report.lines.clone(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
