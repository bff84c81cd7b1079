//! Inline markup → [`Document`].
//!
//! Parsing runs in three stages:
//!
//! 1. Entity type definition blocks are read into an
//!    [`EntityTypeDictionary`] and removed from the text.
//! 2. The remaining text is scanned once, left to right, for
//!    `[span text][token]` pairs. Each consumed pair is replaced by its span
//!    text in the output, and offsets are taken from the output built so far.
//! 3. Escape backslashes are removed and newline runs collapsed; denotation
//!    offsets are carried through both passes.

pub mod format;
mod report;

pub use report::{ParseReport, SkippedAnnotation};

use crate::document::{Config, Denotation, Document, Relation, Span};
use crate::entity_types::{strip_definition_blocks, EntityTypeDictionary};
use crate::token::AnnotationToken;

use format::{collapse_newlines, remove_escape_backslashes};

/// Parses inline markup into a document.
pub fn parse(source: &str) -> Document {
    Parser::new(source).parse()
}

/// Parses inline markup, also reporting bracket pairs left as text.
pub fn parse_with_report(source: &str) -> (Document, ParseReport) {
    Parser::new(source).parse_with_report()
}

/// A parser over one markup source.
///
/// Parsing does not mutate the parser; calling [`Parser::parse`] repeatedly
/// yields identical documents.
#[derive(Debug)]
pub struct Parser<'a> {
    source: &'a str,
    dictionary: EntityTypeDictionary<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            dictionary: EntityTypeDictionary::new(source),
        }
    }

    /// The entity type dictionary defined by the source.
    pub fn dictionary(&self) -> &EntityTypeDictionary<'a> {
        &self.dictionary
    }

    pub fn parse(&self) -> Document {
        self.parse_with_report().0
    }

    pub fn parse_with_report(&self) -> (Document, ParseReport) {
        let body = strip_definition_blocks(self.source);
        let scan = scan_annotations(&body, &self.dictionary);

        let (text, escapes) = remove_escape_backslashes(&scan.text);
        let (text, newlines) = collapse_newlines(&text);
        let remap = |offset: usize| newlines.remap(escapes.remap(offset));

        let denotations = scan
            .denotations
            .into_iter()
            .map(|scanned| Denotation {
                id: scanned.id,
                span: Span::new(remap(scanned.begin), remap(scanned.end)),
                obj: scanned.obj,
            })
            .collect();

        let mut report = ParseReport::new();
        for mut skipped in scan.skipped {
            skipped.offset = remap(skipped.offset);
            report.add(skipped);
        }

        let config = (!self.dictionary.is_empty()).then(|| Config {
            entity_types: self.dictionary.export_entries(),
            ..Default::default()
        });

        let document = Document {
            text,
            denotations,
            relations: scan.relations,
            config,
        };
        (document, report)
    }
}

/// A denotation found by the scanner, in pre-format character offsets.
#[derive(Debug)]
struct ScannedDenotation {
    begin: usize,
    end: usize,
    obj: String,
    id: Option<String>,
}

#[derive(Debug, Default)]
struct Scan {
    text: String,
    denotations: Vec<ScannedDenotation>,
    relations: Vec<Relation>,
    skipped: Vec<SkippedAnnotation>,
}

impl Scan {
    fn record(
        &mut self,
        begin: usize,
        end: usize,
        token: AnnotationToken<'_>,
        dictionary: &EntityTypeDictionary<'_>,
    ) {
        let obj = dictionary.lookup(token.label()).to_string();
        let id = token.id().map(str::to_string);

        match token {
            AnnotationToken::PlainLabel { .. } | AnnotationToken::LabeledSpan { .. } => {}
            AnnotationToken::RelatedSpan {
                id, pred, object, ..
            } => {
                self.relations.push(Relation::new(id, pred, object));
            }
        }

        self.denotations.push(ScannedDenotation { begin, end, obj, id });
    }
}

/// `[span text][token]` located in the body, in byte offsets.
#[derive(Debug, PartialEq, Eq)]
struct BracketPair<'s> {
    start: usize,
    end: usize,
    span_text: &'s str,
    token: &'s str,
}

fn scan_annotations(body: &str, dictionary: &EntityTypeDictionary<'_>) -> Scan {
    let mut scan = Scan {
        text: String::with_capacity(body.len()),
        ..Default::default()
    };
    let mut chars = 0usize;
    let mut cursor = 0usize;

    // The output so far plus `body[cursor..]` is the working text, so the
    // character before `cursor` is the last character of the output.
    while let Some(pair) = find_bracket_pair(body, cursor, scan.text.chars().next_back()) {
        let unchanged = &body[cursor..pair.start];
        scan.text.push_str(unchanged);
        chars += unchanged.chars().count();

        match AnnotationToken::classify(pair.token) {
            Some(token) => {
                let begin = chars;
                scan.text.push_str(pair.span_text);
                chars += pair.span_text.chars().count();
                scan.record(begin, chars, token, dictionary);
            }
            None => {
                let literal = &body[pair.start..pair.end];
                let field_count = AnnotationToken::field_count(pair.token);
                tracing::debug!(
                    token = pair.token,
                    field_count,
                    "leaving bracket pair as text: unsupported field count"
                );
                scan.skipped.push(SkippedAnnotation {
                    offset: chars,
                    text: literal.to_string(),
                    field_count,
                });
                scan.text.push_str(literal);
                chars += literal.chars().count();
            }
        }

        cursor = pair.end;
    }

    scan.text.push_str(&body[cursor..]);
    scan
}

/// Finds the first unescaped bracket pair starting at or after byte `from`.
///
/// `preceding` is the character just before `from` in the working text.
fn find_bracket_pair(text: &str, from: usize, preceding: Option<char>) -> Option<BracketPair<'_>> {
    let bytes = text.as_bytes();

    for (offset, _) in text[from..].match_indices('[') {
        let start = from + offset;
        let escaped = if start == from {
            preceding == Some('\\')
        } else {
            bytes[start - 1] == b'\\'
        };
        if escaped {
            continue;
        }
        if let Some(pair) = bracket_pair_at(text, start) {
            return Some(pair);
        }
    }

    None
}

/// Matches `[span text][token]` at byte `start`, which must hold a `[`.
///
/// The span text is non-empty and contains no `[` (it may contain `]`); the
/// token is non-empty and contains no `]`.
fn bracket_pair_at(text: &str, start: usize) -> Option<BracketPair<'_>> {
    let inner = &text[start + 1..];

    let next_open = inner.find('[')?;
    if next_open < 2 || inner.as_bytes()[next_open - 1] != b']' {
        return None;
    }
    let span_text = &inner[..next_open - 1];

    let after = &inner[next_open + 1..];
    let token_len = after.find(']')?;
    if token_len == 0 {
        return None;
    }
    let token = &after[..token_len];

    Some(BracketPair {
        start,
        end: start + 1 + next_open + 1 + token_len + 1,
        span_text,
        token,
    })
}
