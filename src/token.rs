//! The annotation token: the second bracket of `[span text][token]`.
//!
//! A token is a `", "`-separated list whose length decides its meaning:
//!
//! | fields | form                        | meaning                          |
//! |--------|-----------------------------|----------------------------------|
//! | 1      | `label`                     | plain denotation                 |
//! | 2      | `id, label`                 | denotation with an id            |
//! | 4      | `id, label, pred, object`   | denotation plus outgoing relation|
//!
//! Any other field count is not an annotation and stays literal text.

use std::fmt;

/// Separator between token fields.
pub const FIELD_SEPARATOR: &str = ", ";

/// A classified annotation token, borrowing its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationToken<'a> {
    PlainLabel {
        label: &'a str,
    },
    LabeledSpan {
        id: &'a str,
        label: &'a str,
    },
    RelatedSpan {
        id: &'a str,
        label: &'a str,
        pred: &'a str,
        object: &'a str,
    },
}

impl<'a> AnnotationToken<'a> {
    /// Classifies raw token text by its field count.
    ///
    /// Returns `None` for unsupported field counts.
    pub fn classify(raw: &'a str) -> Option<Self> {
        let fields: Vec<&'a str> = raw.split(FIELD_SEPARATOR).collect();
        match fields[..] {
            [label] => Some(AnnotationToken::PlainLabel { label }),
            [id, label] => Some(AnnotationToken::LabeledSpan { id, label }),
            [id, label, pred, object] => Some(AnnotationToken::RelatedSpan {
                id,
                label,
                pred,
                object,
            }),
            _ => None,
        }
    }

    /// Number of fields in a raw token.
    pub fn field_count(raw: &str) -> usize {
        raw.split(FIELD_SEPARATOR).count()
    }

    /// The entity label (or identifier) of the annotated span.
    pub fn label(&self) -> &'a str {
        match *self {
            AnnotationToken::PlainLabel { label }
            | AnnotationToken::LabeledSpan { label, .. }
            | AnnotationToken::RelatedSpan { label, .. } => label,
        }
    }

    /// The span's cross-reference id, if the token has one.
    pub fn id(&self) -> Option<&'a str> {
        match *self {
            AnnotationToken::PlainLabel { .. } => None,
            AnnotationToken::LabeledSpan { id, .. } | AnnotationToken::RelatedSpan { id, .. } => {
                Some(id)
            }
        }
    }
}

impl fmt::Display for AnnotationToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationToken::PlainLabel { label } => f.write_str(label),
            AnnotationToken::LabeledSpan { id, label } => {
                write!(f, "{id}{sep}{label}", sep = FIELD_SEPARATOR)
            }
            AnnotationToken::RelatedSpan {
                id,
                label,
                pred,
                object,
            } => write!(
                f,
                "{id}{sep}{label}{sep}{pred}{sep}{object}",
                sep = FIELD_SEPARATOR
            ),
        }
    }
}
