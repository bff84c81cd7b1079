//! Entity type definitions written as reference-style blocks.
//!
//! Markup can end with definition lines that map a short label to a
//! canonical identifier, in the style of Markdown reference links:
//!
//! ```text
//! [Elon Musk][Person] is a member of the [PayPal Mafia][Organization].
//!
//! [Person]: https://example.com/Person
//! [Organization]: https://example.com/Organization "optional title"
//! ```
//!
//! A run of consecutive definition lines forms a block. A block only counts
//! when it starts the source or follows a blank line; otherwise the lines are
//! ordinary text.

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::{Captures, Regex};

use crate::document::EntityType;

/// `[label]: id` with an optional quoted title, which is ignored.
const DEFINITION_LINE: &str = r#"^\s*\[([^\]]+)\]:\s+(\S+)(?:\s+(?:"[^"]*"|'[^']*'))?\s*$"#;

static DEFINITION_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(DEFINITION_LINE).unwrap());

/// A block of definition lines at the start of the source or after a blank
/// line. Group 1 is the block without its leading separator.
static DEFINITION_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?m)(?:\A|\n\s*\n)((?:{}(?:\n|$))+)",
        DEFINITION_LINE
    ))
    .unwrap()
});

/// One label → identifier mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityTypeEntry {
    pub label: String,
    pub id: String,
}

/// Label → identifier dictionary read from the definition blocks of a source.
///
/// Extraction runs at most once per dictionary, on first use.
#[derive(Debug)]
pub struct EntityTypeDictionary<'a> {
    source: &'a str,
    entries: OnceCell<Vec<EntityTypeEntry>>,
}

impl<'a> EntityTypeDictionary<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            entries: OnceCell::new(),
        }
    }

    /// Entries in the order their labels were first defined.
    pub fn entries(&self) -> &[EntityTypeEntry] {
        self.entries.get_or_init(|| read_entries(self.source))
    }

    /// Returns the identifier defined for `label`, or `label` itself.
    pub fn lookup<'s>(&'s self, label: &'s str) -> &'s str {
        self.entries()
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.id.as_str())
            .unwrap_or(label)
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The dictionary as document entity types, in definition order.
    pub fn export_entries(&self) -> Vec<EntityType> {
        self.entries()
            .iter()
            .map(|entry| EntityType::new(entry.id.clone(), entry.label.clone()))
            .collect()
    }
}

fn read_entries(source: &str) -> Vec<EntityTypeEntry> {
    let mut entries: Vec<EntityTypeEntry> = Vec::new();

    for block in DEFINITION_BLOCK_RE.find_iter(source) {
        for line in block.as_str().split('\n') {
            let Some(caps) = DEFINITION_LINE_RE.captures(line.trim()) else {
                continue;
            };
            let (label, id) = (&caps[1], &caps[2]);

            if label == id {
                continue;
            }
            if entries.iter().any(|entry| entry.label == label) {
                tracing::trace!(label, id, "ignoring redefinition of entity type label");
                continue;
            }
            tracing::trace!(label, id, "entity type definition");
            entries.push(EntityTypeEntry {
                label: label.to_string(),
                id: id.to_string(),
            });
        }
    }

    entries
}

/// Removes every definition block from `source` and trims the result.
///
/// A block that follows a blank line collapses to a single blank line; a
/// block at the very start disappears.
pub fn strip_definition_blocks(source: &str) -> String {
    DEFINITION_BLOCK_RE
        .replace_all(source, |caps: &Captures| match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(block)) if block.start() > whole.start() => "\n\n",
            _ => "",
        })
        .trim()
        .to_string()
}
