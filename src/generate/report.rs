//! Generation report types.
//!
//! Generation never fails on bad annotations; it drops them. The report
//! records what was dropped and why, so callers can tell a faithful
//! rendering from a lossy one.

use serde::Serialize;
use std::fmt;

use crate::resolve::SpanRule;

/// A report produced alongside generated markup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Counts from the input document.
    pub input: GenerationCounts,
    /// Counts that made it into the markup.
    pub output: GenerationCounts,
    /// Everything that was dropped, in the order it was found.
    pub issues: Vec<GenerationIssue>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: GenerationIssue) {
        self.issues.push(issue);
    }

    /// Returns true if any input annotation is missing from the markup.
    pub fn is_lossy(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Number of issues with the given code.
    pub fn count(&self, code: GenerationIssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} denotations, {} relations, {} entity types",
            self.input.denotations, self.input.relations, self.input.entity_types
        )?;

        if self.output != self.input {
            writeln!(
                f,
                "  output: {} denotations, {} relations, {} entity types",
                self.output.denotations, self.output.relations, self.output.entity_types
            )?;
        }

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Dropped ({}):", self.issues.len())?;
            for issue in &self.issues {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts of document elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationCounts {
    pub denotations: usize,
    pub relations: usize,
    /// Labeled entity types, the ones that become definition lines.
    pub entity_types: usize,
}

/// A single dropped annotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationIssue {
    pub code: GenerationIssueCode,
    pub message: String,
}

impl GenerationIssue {
    pub fn new(code: GenerationIssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON report and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationIssueCode {
    /// A span repeats an earlier span exactly.
    DuplicateSpan,
    /// A span bound is not an integer.
    NonIntegerSpan,
    /// A span bound is negative.
    NegativeSpan,
    /// A span begins after it ends.
    InvertedSpan,
    /// A span does not fit the text.
    OutOfBoundsSpan,
    /// A span lies inside another span.
    NestedSpan,
    /// A span partially overlaps another span.
    BoundaryCrossingSpan,
    /// A relation lacks a subject, predicate or object.
    IncompleteRelation,
    /// A relation has no rendered denotation to attach to.
    UnattachedRelation,
}

impl From<SpanRule> for GenerationIssueCode {
    fn from(rule: SpanRule) -> Self {
        match rule {
            SpanRule::Duplicate => GenerationIssueCode::DuplicateSpan,
            SpanRule::NonInteger => GenerationIssueCode::NonIntegerSpan,
            SpanRule::Negative => GenerationIssueCode::NegativeSpan,
            SpanRule::Inverted => GenerationIssueCode::InvertedSpan,
            SpanRule::OutOfBounds => GenerationIssueCode::OutOfBoundsSpan,
            SpanRule::Nested => GenerationIssueCode::NestedSpan,
            SpanRule::BoundaryCrossing => GenerationIssueCode::BoundaryCrossingSpan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_not_lossy() {
        let report = GenerationReport::new();
        assert!(!report.is_lossy());
    }

    #[test]
    fn span_rules_map_to_codes() {
        assert_eq!(
            GenerationIssueCode::from(SpanRule::BoundaryCrossing),
            GenerationIssueCode::BoundaryCrossingSpan
        );
        assert_eq!(
            GenerationIssueCode::from(SpanRule::Duplicate),
            GenerationIssueCode::DuplicateSpan
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = GenerationReport::new();
        report.input = GenerationCounts {
            denotations: 2,
            relations: 1,
            entity_types: 0,
        };
        report.output = GenerationCounts {
            denotations: 1,
            relations: 0,
            entity_types: 0,
        };
        report.add(GenerationIssue::new(
            GenerationIssueCode::OutOfBoundsSpan,
            "span [100, 200) out of text bounds",
        ));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["input"]["denotations"], 2);
        assert_eq!(json["output"]["relations"], 0);
        assert_eq!(json["issues"][0]["code"], "out_of_bounds_span");
        assert_eq!(report.count(GenerationIssueCode::OutOfBoundsSpan), 1);
    }

    #[test]
    fn display_lists_dropped_items() {
        let mut report = GenerationReport::new();
        report.input.denotations = 1;
        report.add(GenerationIssue::new(
            GenerationIssueCode::NegativeSpan,
            "span [-1, 9) negative position",
        ));

        let text = report.to_string();
        assert!(text.contains("1 denotations"));
        assert!(text.contains("output: 0 denotations"));
        assert!(text.contains("Dropped (1):"));
        assert!(text.contains("negative position"));
    }
}
