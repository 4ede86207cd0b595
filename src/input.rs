//! Two-column `label,value` input
//!
//! Each non-blank line holds a group label and one latency measurement.
//! The first label seen is the baseline, the other one the candidate.
//! Further columns are ignored. Labels may be double-quoted, with `""` as
//! an escaped quote.

use crate::comparison::{SampleGroup, SampleGroups};
use crate::error::{AbError, Result};
use anyhow::Context;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Parsed input ready for comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub groups: SampleGroups,
    /// Both groups did not contain the same number of values
    pub count_mismatch: bool,
}

/// Parse `label,value` lines into baseline and candidate groups
///
/// # Example
/// ```
/// use abstats::input::parse_input;
///
/// let parsed = parse_input("old,10.5\nnew,11.0\nold,10.7\nnew,11.2\n").unwrap();
/// assert_eq!(parsed.groups.baseline.label, "old");
/// assert_eq!(parsed.groups.candidate.sample.values(), &[11.0, 11.2]);
/// assert!(!parsed.count_mismatch);
/// ```
pub fn parse_input(content: &str) -> Result<ParsedInput> {
    // First-seen order decides which group is the baseline
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (label, value) = split_record(line).ok_or_else(|| {
            AbError::MalformedInput(format!(
                "line {}: expected <label>,<value>, got {:?}",
                line_no, line
            ))
        })?;

        let value: f64 = value.parse().map_err(|_| {
            AbError::MalformedInput(format!(
                "line {}: {:?} is not a number",
                line_no, value
            ))
        })?;

        match groups.iter_mut().find(|(name, _)| *name == label) {
            Some((_, values)) => values.push(value),
            None => groups.push((label, vec![value])),
        }
    }

    if groups.len() != 2 {
        return Err(AbError::MalformedInput(format!(
            "You must provide exactly two groups, got {}",
            groups.len()
        )));
    }

    let mut groups = groups.into_iter();
    let (Some((old_label, old_values)), Some((new_label, new_values))) =
        (groups.next(), groups.next())
    else {
        return Err(AbError::MalformedInput(
            "You must provide exactly two groups".to_string(),
        ));
    };

    let baseline = SampleGroup::new(old_label, old_values)?;
    let candidate = SampleGroup::new(new_label, new_values)?;
    let groups = SampleGroups::new(baseline, candidate);

    let count_mismatch = !groups.counts_match();
    if count_mismatch {
        tracing::warn!(
            "Both groups do not have the same number of values: got {} values for {} but {} values for {}",
            groups.baseline.sample.len(),
            groups.baseline.label,
            groups.candidate.sample.len(),
            groups.candidate.label
        );
    }

    tracing::debug!(
        baseline = %groups.baseline.label,
        candidate = %groups.candidate.label,
        "parsed input"
    );

    Ok(ParsedInput {
        groups,
        count_mismatch,
    })
}

/// Read and parse input from a file, or stdin when `path` is `None` or `-`
pub fn read_input(path: Option<&Path>) -> anyhow::Result<ParsedInput> {
    let content = match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file: {}", p.display()))?,
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };

    Ok(parse_input(&content)?)
}

/// Split a record into (label, second field)
fn split_record(line: &str) -> Option<(String, &str)> {
    let (label, rest) = if let Some(quoted) = line.strip_prefix('"') {
        let (label, after) = unquote(quoted)?;
        (label, after.trim_start().strip_prefix(',')?)
    } else {
        let (label, rest) = line.split_once(',')?;
        (label.trim().to_string(), rest)
    };

    let value = rest.split(',').next().unwrap_or("").trim();
    Some((label, value))
}

/// Read a quoted field body; returns the label and the text after the closing quote
fn unquote(s: &str) -> Option<(String, &str)> {
    let mut label = String::new();
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '"' {
            if let Some(&(_, '"')) = chars.peek() {
                label.push('"');
                chars.next();
            } else {
                return Some((label, &s[i + 1..]));
            }
        } else {
            label.push(c);
        }
    }

    None
}
