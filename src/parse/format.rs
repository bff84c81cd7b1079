//! Final text clean-up passes applied after annotations are scanned.
//!
//! Each pass returns the characters it removed so that offsets computed
//! before the pass can be carried over to the text after it.

/// Character positions removed by a pass, ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Removals(Vec<usize>);

impl Removals {
    /// Maps a character offset in the text before the pass to the text after.
    pub fn remap(&self, offset: usize) -> usize {
        offset - self.0.partition_point(|&removed| removed < offset)
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Removes each backslash that escapes a `[..][..]` shape.
///
/// The shape is checked on the text alone, so a backslash is removed even if
/// the brackets after it would not have formed a valid annotation.
pub fn remove_escape_backslashes(text: &str) -> (String, Removals) {
    let mut out = String::with_capacity(text.len());
    let mut removed = Vec::new();

    for (char_index, (byte_index, ch)) in text.char_indices().enumerate() {
        if ch == '\\' && starts_with_bracket_pair(&text[byte_index + 1..]) {
            removed.push(char_index);
        } else {
            out.push(ch);
        }
    }

    (out, Removals(removed))
}

/// Collapses every run of two or more newlines to exactly two.
pub fn collapse_newlines(text: &str) -> (String, Removals) {
    let mut out = String::with_capacity(text.len());
    let mut removed = Vec::new();
    let mut run = 0usize;

    for (char_index, ch) in text.chars().enumerate() {
        if ch == '\n' {
            run += 1;
            if run > 2 {
                removed.push(char_index);
                continue;
            }
        } else {
            run = 0;
        }
        out.push(ch);
    }

    (out, Removals(removed))
}

/// `[`, one or more non-`]`, `]`, `[`, one or more non-`]`, `]`.
fn starts_with_bracket_pair(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('[') else {
        return false;
    };
    let Some(close) = rest.find(']') else {
        return false;
    };
    if close == 0 {
        return false;
    }
    let Some(rest) = rest[close + 1..].strip_prefix('[') else {
        return false;
    };
    matches!(rest.find(']'), Some(len) if len > 0)
}
