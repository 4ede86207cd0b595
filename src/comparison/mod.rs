// Statistical A/B comparison of benchmark latencies
//
// Decides whether a candidate ("new", B) has regressed against a baseline
// ("old", A) from two independent latency samples, and renders a report
// that puts both samples on the same histogram scale.
//
// Components:
// - interval: confidence interval half-width around the mean (Student's t)
// - histogram: glyph histograms over a shared range
// - checks: variance sufficiency, Welch's t-test on means, tail (no-op)
// - comparator: runs the report and the checks, folds them into a verdict
//
// Welch's t-test does not assume both variants share a variance: a change
// in code generation can move the spread as well as the mean. Student's t
// probabilities and quantiles come from statrs.

mod checks;
mod comparator;
mod config;
mod histogram;
mod interval;
mod report;
mod sample;

pub use checks::{
    check_mean, check_tail, check_variance, classify_shift, welch_t_test, CheckKind,
    CheckOutcome, MeanCheck, MeanShift, WelchTest,
};
pub use comparator::{compare, ComparisonOutcome, GroupSummary, HistogramBounds};
pub use config::AnalysisConfig;
pub use histogram::{bucket_glyph, render, Histogram, HistogramRange, GLYPHS};
pub use interval::{
    critical_value, format_mean, half_width, mean_with_interval, MeanInterval, MIN_SAMPLES,
};
pub use report::{LineRole, Report, ReportLine, Severity};
pub use sample::{Sample, SampleGroup, SampleGroups};
