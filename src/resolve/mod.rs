//! Span conflict resolution.
//!
//! Before denotations can be rendered as inline markup they have to form a
//! flat, well-formed set: every span must address the text and no two spans
//! may overlap. [`resolve`] applies a fixed pipeline of rules and keeps the
//! spans that pass all of them:
//!
//! 1. exact-span duplicates (first occurrence kept)
//! 2. non-integer bounds
//! 3. negative bounds
//! 4. inverted bounds (`begin > end`)
//! 5. out-of-bounds spans
//! 6. spans nested within an already kept span (outer one kept)
//! 7. boundary-crossing spans (both members of a crossing pair dropped)
//!
//! The order is significant: nesting is decided before crossing, so a span
//! that both contains one span and crosses another is dropped only for the
//! crossing.

pub mod relations;

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::document::{Denotation, Span};

pub use relations::filter_relations;

/// The rule a dropped span violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanRule {
    /// Same `(begin, end)` as an earlier span.
    Duplicate,
    /// A bound is not an integer.
    NonInteger,
    /// A bound is negative.
    Negative,
    /// The span begins after it ends.
    Inverted,
    /// The span does not fit the text.
    OutOfBounds,
    /// The span lies within another kept span.
    Nested,
    /// The span partially overlaps another span.
    BoundaryCrossing,
}

impl fmt::Display for SpanRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SpanRule::Duplicate => "duplicate span",
            SpanRule::NonInteger => "non-integer position",
            SpanRule::Negative => "negative position",
            SpanRule::Inverted => "begin after end",
            SpanRule::OutOfBounds => "out of text bounds",
            SpanRule::Nested => "nested within another span",
            SpanRule::BoundaryCrossing => "crosses another span's boundary",
        };
        f.write_str(text)
    }
}

/// A denotation removed by the resolver, with the reason.
#[derive(Clone, Debug, PartialEq)]
pub struct DroppedSpan {
    pub rule: SpanRule,
    pub denotation: Denotation,
}

/// Outcome of [`resolve_with_report`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Surviving denotations, ordered by `begin` ascending.
    pub kept: Vec<Denotation>,
    /// Removed denotations, in the order the rules removed them.
    pub dropped: Vec<DroppedSpan>,
}

/// Returns the denotations that can be rendered against a text of
/// `text_length` characters.
pub fn resolve(denotations: Vec<Denotation>, text_length: usize) -> Vec<Denotation> {
    resolve_with_report(denotations, text_length).kept
}

/// Like [`resolve`], but also reports every dropped denotation.
pub fn resolve_with_report(denotations: Vec<Denotation>, text_length: usize) -> Resolution {
    let mut dropped = Vec::new();

    let denotations = remove_duplicates(denotations, &mut dropped);
    let denotations = remove_where(denotations, SpanRule::NonInteger, &mut dropped, |span| {
        span.is_position_not_integer()
    });
    let denotations = remove_where(denotations, SpanRule::Negative, &mut dropped, |span| {
        span.is_position_negative()
    });
    let denotations = remove_where(denotations, SpanRule::Inverted, &mut dropped, |span| {
        span.is_position_invalid()
    });
    let denotations = remove_where(denotations, SpanRule::OutOfBounds, &mut dropped, |span| {
        span.is_out_of_bounds(text_length)
    });
    let denotations = remove_nests(denotations, &mut dropped);
    let kept = remove_boundary_crosses(denotations, &mut dropped);

    Resolution { kept, dropped }
}

fn drop_denotation(rule: SpanRule, denotation: Denotation, dropped: &mut Vec<DroppedSpan>) {
    tracing::debug!(
        span = %denotation.span,
        obj = %denotation.obj,
        "dropping denotation: {}",
        rule
    );
    dropped.push(DroppedSpan { rule, denotation });
}

fn remove_duplicates(
    denotations: Vec<Denotation>,
    dropped: &mut Vec<DroppedSpan>,
) -> Vec<Denotation> {
    let mut seen: Vec<Span> = Vec::with_capacity(denotations.len());
    let mut result = Vec::with_capacity(denotations.len());

    for denotation in denotations {
        if seen.contains(&denotation.span) {
            drop_denotation(SpanRule::Duplicate, denotation, dropped);
        } else {
            seen.push(denotation.span);
            result.push(denotation);
        }
    }

    result
}

fn remove_where(
    denotations: Vec<Denotation>,
    rule: SpanRule,
    dropped: &mut Vec<DroppedSpan>,
    predicate: impl Fn(&Span) -> bool,
) -> Vec<Denotation> {
    let mut result = Vec::with_capacity(denotations.len());
    for denotation in denotations {
        if predicate(&denotation.span) {
            drop_denotation(rule, denotation, dropped);
        } else {
            result.push(denotation);
        }
    }
    result
}

/// Keeps outer spans over the spans they contain.
///
/// Sorting by `begin` ascending and `end` descending puts every span after
/// all spans that could contain it.
fn remove_nests(
    mut denotations: Vec<Denotation>,
    dropped: &mut Vec<DroppedSpan>,
) -> Vec<Denotation> {
    denotations.sort_by(|a, b| {
        let begin = a.span.begin.partial_cmp(&b.span.begin);
        let end = b.span.end.partial_cmp(&a.span.end);
        begin
            .unwrap_or(Ordering::Equal)
            .then(end.unwrap_or(Ordering::Equal))
    });

    let mut result: Vec<Denotation> = Vec::with_capacity(denotations.len());
    for denotation in denotations {
        let nested = result
            .iter()
            .any(|outer| denotation.span.is_nested_within(&outer.span));
        if nested {
            drop_denotation(SpanRule::Nested, denotation, dropped);
        } else {
            result.push(denotation);
        }
    }

    result
}

fn remove_boundary_crosses(
    denotations: Vec<Denotation>,
    dropped: &mut Vec<DroppedSpan>,
) -> Vec<Denotation> {
    let crossing: Vec<bool> = denotations
        .iter()
        .enumerate()
        .map(|(i, denotation)| {
            denotations.iter().enumerate().any(|(j, other)| {
                i != j && denotation.span.is_boundary_crossing(&other.span)
            })
        })
        .collect();

    let mut result = Vec::with_capacity(denotations.len());
    for (denotation, crosses) in denotations.into_iter().zip(crossing) {
        if crosses {
            drop_denotation(SpanRule::BoundaryCrossing, denotation, dropped);
        } else {
            result.push(denotation);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Offset;

    const TEXT_LEN: usize = 42;

    fn spans(denotations: &[Denotation]) -> Vec<(Offset, Offset)> {
        denotations
            .iter()
            .map(|d| (d.span.begin, d.span.end))
            .collect()
    }

    #[test]
    fn keeps_disjoint_spans() {
        let input = vec![
            Denotation::new(0usize, 9usize, "Person"),
            Denotation::new(29usize, 41usize, "Organization"),
        ];
        assert_eq!(resolve(input.clone(), TEXT_LEN), input);
    }

    #[test]
    fn first_duplicate_wins() {
        let resolution = resolve_with_report(
            vec![
                Denotation::new(0usize, 9usize, "Person"),
                Denotation::new(0usize, 9usize, "Organization"),
            ],
            TEXT_LEN,
        );
        assert_eq!(resolution.kept.len(), 1);
        assert_eq!(resolution.kept[0].obj, "Person");
        assert_eq!(resolution.dropped[0].rule, SpanRule::Duplicate);
    }

    #[test]
    fn drops_malformed_bounds() {
        let resolution = resolve_with_report(
            vec![
                Denotation::new(Offset::Fraction(0.1), Offset::Fraction(9.6), "A"),
                Denotation::new(Offset::Index(-1), Offset::Index(9), "B"),
                Denotation::new(4usize, 0usize, "C"),
                Denotation::new(100usize, 200usize, "D"),
            ],
            TEXT_LEN,
        );
        assert!(resolution.kept.is_empty());
        let rules: Vec<SpanRule> = resolution.dropped.iter().map(|d| d.rule).collect();
        assert_eq!(
            rules,
            vec![
                SpanRule::NonInteger,
                SpanRule::Negative,
                SpanRule::Inverted,
                SpanRule::OutOfBounds
            ]
        );
    }

    #[test]
    fn span_ending_at_text_end_is_kept() {
        let kept = resolve(vec![Denotation::new(3usize, 5usize, "X")], 5);
        assert_eq!(kept.len(), 1);

        let kept = resolve(vec![Denotation::new(5usize, 5usize, "X")], 5);
        assert!(kept.is_empty());
    }

    #[test]
    fn outer_span_wins_regardless_of_input_order() {
        for input in [
            vec![
                Denotation::new(0usize, 9usize, "Person"),
                Denotation::new(2usize, 6usize, "Organization"),
            ],
            vec![
                Denotation::new(0usize, 4usize, "First name"),
                Denotation::new(0usize, 9usize, "Full name"),
            ],
            vec![
                Denotation::new(6usize, 9usize, "Last name"),
                Denotation::new(0usize, 9usize, "Full name"),
            ],
        ] {
            let kept = resolve(input, TEXT_LEN);
            assert_eq!(spans(&kept), vec![(Offset::Index(0), Offset::Index(9))]);
        }
    }

    #[test]
    fn crossing_pair_is_dropped_entirely() {
        let resolution = resolve_with_report(
            vec![
                Denotation::new(0usize, 9usize, "Person"),
                Denotation::new(8usize, 11usize, "Organization"),
            ],
            TEXT_LEN,
        );
        assert!(resolution.kept.is_empty());
        assert!(resolution
            .dropped
            .iter()
            .all(|d| d.rule == SpanRule::BoundaryCrossing));
    }

    #[test]
    fn crossing_drops_only_the_crossing_members() {
        let kept = resolve(
            vec![
                Denotation::new(0usize, 5usize, "A"),
                Denotation::new(3usize, 8usize, "B"),
                Denotation::new(20usize, 25usize, "C"),
            ],
            TEXT_LEN,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].obj, "C");
    }

    #[test]
    fn nested_span_removed_before_crossing_check() {
        // [2, 6) and [4, 8) cross each other, but both sit inside [0, 9).
        let resolution = resolve_with_report(
            vec![
                Denotation::new(2usize, 6usize, "B"),
                Denotation::new(4usize, 8usize, "C"),
                Denotation::new(0usize, 9usize, "A"),
            ],
            TEXT_LEN,
        );
        assert_eq!(resolution.kept.len(), 1);
        assert_eq!(resolution.kept[0].obj, "A");
        assert!(resolution.dropped.iter().all(|d| d.rule == SpanRule::Nested));
    }

    #[test]
    fn adjacent_spans_do_not_conflict() {
        let kept = resolve(
            vec![
                Denotation::new(4usize, 8usize, "B"),
                Denotation::new(0usize, 4usize, "A"),
            ],
            TEXT_LEN,
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].obj, "A");
    }

    #[test]
    fn zero_width_span_inside_another_is_nested() {
        let kept = resolve(
            vec![
                Denotation::new(3usize, 3usize, "Empty"),
                Denotation::new(0usize, 9usize, "Outer"),
            ],
            TEXT_LEN,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].obj, "Outer");
    }
}
