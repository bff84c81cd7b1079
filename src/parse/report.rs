//! Report of bracket pairs the parser left as literal text.

use serde::Serialize;
use std::fmt;

/// Everything the parser saw but did not turn into an annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub skipped: Vec<SkippedAnnotation>,
}

impl ParseReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, skipped: SkippedAnnotation) {
        self.skipped.push(skipped);
    }

    /// Returns true if every bracket pair was consumed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped.is_empty() {
            return writeln!(f, "Parse completed: all annotations consumed");
        }

        writeln!(
            f,
            "Parse completed with {} annotation(s) left as text:",
            self.skipped.len()
        )?;
        for skipped in &self.skipped {
            writeln!(f, "  - {}", skipped)?;
        }
        Ok(())
    }
}

/// A `[span text][token]` pair whose token has an unsupported field count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedAnnotation {
    /// Character offset of the literal in the parsed text.
    pub offset: usize,
    /// The literal bracket pair.
    pub text: String,
    /// Number of `", "`-separated fields in the token.
    pub field_count: usize,
}

impl fmt::Display for SkippedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at offset {}: token has {} fields (expected 1, 2 or 4)",
            self.text, self.offset, self.field_count
        )
    }
}
