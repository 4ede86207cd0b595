// Comparison report
//
// The report is plain data: ordered lines, each tagged with a severity and
// a role. Turning that into colored terminal output or JSON is the job of
// the presentation layer (`terminal_output`, `json_output`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a report line should be treated by a presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Internal detail, only shown when verbose
    Debug,
    Info,
    /// A favourable finding (improvement)
    Success,
    /// A failed check
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Success => "INFO",
            Severity::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Which group a summary line belongs to, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    Baseline,
    Candidate,
    Diagnostic,
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub severity: Severity,
    pub role: LineRole,
    pub text: String,
}

/// Ordered report lines for one comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, role: LineRole, text: impl Into<String>) {
        self.lines.push(ReportLine {
            severity,
            role,
            text: text.into(),
        });
    }

    pub fn debug(&mut self, text: impl Into<String>) {
        self.push(Severity::Debug, LineRole::Diagnostic, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(Severity::Info, LineRole::Diagnostic, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(Severity::Success, LineRole::Diagnostic, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(Severity::Error, LineRole::Diagnostic, text);
    }

    pub fn extend(&mut self, other: Report) {
        self.lines.extend(other.lines);
    }

    /// Lines at or above `min` severity (Debug < Info < Success < Error)
    pub fn lines_at_least(&self, min: Severity) -> impl Iterator<Item = &ReportLine> {
        self.lines
            .iter()
            .filter(move |line| severity_rank(line.severity) >= severity_rank(min))
    }

    pub fn has_errors(&self) -> bool {
        self.lines.iter().any(|l| l.severity == Severity::Error)
    }

    /// Uncolored text, one `LEVEL:message` line per report line
    pub fn to_report_string(&self, min: Severity) -> String {
        let mut report = String::new();
        for line in self.lines_at_least(min) {
            report.push_str(&format!("{}:{}\n", line.severity, line.text));
        }
        report
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Debug => 0,
        Severity::Info | Severity::Success => 1,
        Severity::Error => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut report = Report::new();
        report.info("first");
        report.error("second");
        report.debug("third");

        let texts: Vec<_> = report.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_lines_at_least_filters_debug() {
        let mut report = Report::new();
        report.debug("hidden");
        report.info("shown");
        report.success("improved");

        let shown: Vec<_> = report.lines_at_least(Severity::Info).collect();
        assert_eq!(shown.len(), 2);
        assert_eq!(report.lines_at_least(Severity::Debug).count(), 3);
    }

    #[test]
    fn test_has_errors() {
        let mut report = Report::new();
        report.info("fine");
        assert!(!report.has_errors());
        report.error("broken");
        assert!(report.has_errors());
    }

    #[test]
    fn test_to_report_string() {
        let mut report = Report::new();
        report.push(Severity::Info, LineRole::Baseline, "A execution time");
        report.error("execution regressed by 29.9%");

        let text = report.to_report_string(Severity::Info);
        assert_eq!(
            text,
            "INFO:A execution time\nERROR:execution regressed by 29.9%\n"
        );
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }
}
