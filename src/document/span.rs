//! Character spans and the offsets that bound them.
//!
//! Offsets are counted in Unicode scalar values (Rust `char`s), not bytes.
//! Span bounds are deliberately permissive: a document read from JSON may
//! carry fractional or negative offsets, and the conflict resolver is the
//! place that decides what to do with them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

/// One bound of a span, as found in a document.
///
/// Integral JSON numbers become [`Offset::Index`]; anything else (`0.5`,
/// `9.0`, or integers too large for `i64`) becomes [`Offset::Fraction`] and
/// is never rendered.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Offset {
    Index(i64),
    Fraction(f64),
}

impl Offset {
    /// Returns the integral value, if this offset has one.
    #[inline]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Offset::Index(i) => Some(*i),
            Offset::Fraction(_) => None,
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Offset::Index(i) => *i < 0,
            Offset::Fraction(f) => *f < 0.0,
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Offset::Index(i) => *i as f64,
            Offset::Fraction(f) => *f,
        }
    }
}

impl PartialOrd for Offset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Offset::Index(a), Offset::Index(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl From<usize> for Offset {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(Offset::Index)
            .unwrap_or(Offset::Fraction(value as f64))
    }
}

impl From<i64> for Offset {
    fn from(value: i64) -> Self {
        Offset::Index(value)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Index(i) => write!(f, "{}", i),
            Offset::Fraction(x) => write!(f, "{}", x),
        }
    }
}

/// A half-open character interval `[begin, end)` within a document's text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub begin: Offset,
    pub end: Offset,
}

impl Span {
    /// Creates a span from character offsets.
    pub fn new(begin: impl Into<Offset>, end: impl Into<Offset>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Returns the span as a `char` index range when both bounds are
    /// non-negative integers.
    pub fn char_range(&self) -> Option<Range<usize>> {
        let begin = usize::try_from(self.begin.as_index()?).ok()?;
        let end = usize::try_from(self.end.as_index()?).ok()?;
        Some(begin..end)
    }

    /// Returns true if either bound is not an integer.
    pub fn is_position_not_integer(&self) -> bool {
        self.begin.as_index().is_none() || self.end.as_index().is_none()
    }

    pub fn is_position_negative(&self) -> bool {
        self.begin.is_negative() || self.end.is_negative()
    }

    /// Returns true if the span begins after it ends.
    pub fn is_position_invalid(&self) -> bool {
        self.begin > self.end
    }

    /// Returns true if the span cannot address a text of `text_length` chars.
    ///
    /// A span starting exactly at the end of the text is out of bounds even
    /// when it is zero-width; a span ending there is not.
    pub fn is_out_of_bounds(&self, text_length: usize) -> bool {
        let length = Offset::from(text_length);
        self.begin >= length || self.end > length
    }

    /// Returns true if `other` contains this span (bounds may coincide).
    pub fn is_nested_within(&self, other: &Span) -> bool {
        other.begin <= self.begin && self.end <= other.end
    }

    /// Returns true if exactly one bound of this span falls strictly inside
    /// `other`, i.e. the two overlap without either containing the other.
    pub fn is_boundary_crossing(&self, other: &Span) -> bool {
        let starts_inside_other = self.begin > other.begin && self.begin < other.end;
        let ends_inside_other = self.end > other.begin && self.end < other.end;

        starts_inside_other || ends_inside_other
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_deserialize_by_integrality() {
        let span: Span = serde_json::from_str(r#"{"begin": 0, "end": 9.6}"#).unwrap();
        assert_eq!(span.begin, Offset::Index(0));
        assert_eq!(span.end, Offset::Fraction(9.6));
        assert!(span.is_position_not_integer());
    }

    #[test]
    fn integral_offsets_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&Span::new(0usize, 9usize)).unwrap();
        assert_eq!(json, r#"{"begin":0,"end":9}"#);
    }

    #[test]
    fn out_of_bounds_edges() {
        assert!(!Span::new(0usize, 5usize).is_out_of_bounds(5));
        assert!(Span::new(5usize, 5usize).is_out_of_bounds(5));
        assert!(Span::new(2usize, 6usize).is_out_of_bounds(5));
    }

    #[test]
    fn nesting_includes_shared_bounds() {
        let outer = Span::new(0usize, 9usize);
        assert!(Span::new(0usize, 4usize).is_nested_within(&outer));
        assert!(Span::new(6usize, 9usize).is_nested_within(&outer));
        assert!(outer.is_nested_within(&outer));
        assert!(!outer.is_nested_within(&Span::new(2usize, 6usize)));
    }

    #[test]
    fn boundary_crossing_is_partial_overlap() {
        let a = Span::new(0usize, 9usize);
        let b = Span::new(8usize, 11usize);
        assert!(a.is_boundary_crossing(&b));
        assert!(b.is_boundary_crossing(&a));

        let adjacent = Span::new(9usize, 12usize);
        assert!(!a.is_boundary_crossing(&adjacent));
    }

    #[test]
    fn negative_and_inverted() {
        assert!(Span::new(Offset::Index(-1), Offset::Index(9)).is_position_negative());
        assert!(Span::new(4usize, 0usize).is_position_invalid());
        assert!(!Span::new(4usize, 4usize).is_position_invalid());
    }

    #[test]
    fn char_range_requires_non_negative_integers() {
        assert_eq!(Span::new(2usize, 6usize).char_range(), Some(2..6));
        assert_eq!(Span::new(Offset::Index(-1), Offset::Index(3)).char_range(), None);
        assert_eq!(
            Span::new(Offset::Fraction(0.1), Offset::Index(3)).char_range(),
            None
        );
    }
}
