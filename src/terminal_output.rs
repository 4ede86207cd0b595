//! Terminal rendering of comparison reports
//!
//! Colors: baseline summary blue, candidate summary cyan, failed checks
//! red, improvements green. Debug lines only appear in verbose mode.

use crate::comparison::{ComparisonOutcome, LineRole, ReportLine, Severity};
use colored::Colorize;

/// Renders a [`ComparisonOutcome`] as terminal text
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    color: bool,
    verbose: bool,
}

impl TerminalRenderer {
    pub fn new(color: bool, verbose: bool) -> Self {
        Self { color, verbose }
    }

    fn min_severity(&self) -> Severity {
        if self.verbose {
            Severity::Debug
        } else {
            Severity::Info
        }
    }

    /// Report lines as `LEVEL:message`, followed by the verdict
    pub fn render(&self, outcome: &ComparisonOutcome) -> String {
        let mut output = String::new();

        for line in outcome.report.lines_at_least(self.min_severity()) {
            output.push_str(&self.paint(line));
            output.push('\n');
        }

        let verdict = if outcome.verdict { "PASS" } else { "FAIL" };
        let verdict = match (self.color, outcome.verdict) {
            (false, _) => verdict.to_string(),
            (true, true) => verdict.green().bold().to_string(),
            (true, false) => verdict.red().bold().to_string(),
        };
        output.push_str(&format!("verdict: {}\n", verdict));

        output
    }

    fn paint(&self, line: &ReportLine) -> String {
        let text = format!("{}:{}", line.severity, line.text);
        if !self.color {
            return text;
        }

        match (line.role, line.severity) {
            (LineRole::Baseline, _) => text.blue().to_string(),
            (LineRole::Candidate, _) => text.cyan().to_string(),
            (_, Severity::Error) => text.red().to_string(),
            (_, Severity::Success) => text.green().to_string(),
            (_, Severity::Debug) => text.dimmed().to_string(),
            (_, Severity::Info) => text,
        }
    }
}
