//! Structured form of an annotated-text document.
//!
//! The field names and nesting follow the established JSON layout for these
//! documents (`text`, `denotations[].span.begin`, `config["entity types"]`,
//! ...), so values round-trip with documents produced by other tools.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::span::{Offset, Span};

/// An annotated-text document.
///
/// `text` defaults to the empty string when absent from JSON; generation
/// treats an empty text as missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The plain text being annotated.
    #[serde(default)]
    pub text: String,

    /// Labeled character spans, in document order.
    #[serde(default)]
    pub denotations: Vec<Denotation>,

    /// Typed links between denotation ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,

    /// Optional configuration, holding the entity type dictionary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
}

impl Document {
    /// Creates a document with text and no annotations.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Adds a denotation.
    pub fn with_denotation(mut self, denotation: Denotation) -> Self {
        self.denotations.push(denotation);
        self
    }

    /// Adds a relation.
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Adds an entity type to the configuration, creating it if needed.
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.config
            .get_or_insert_with(Config::default)
            .entity_types
            .push(entity_type);
        self
    }

    /// All configured entity types, labeled or not.
    pub fn entity_types(&self) -> &[EntityType] {
        self.config
            .as_ref()
            .map(|config| config.entity_types.as_slice())
            .unwrap_or_default()
    }

    /// Entity types that carry a label, in configuration order.
    pub fn labeled_entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.entity_types().iter().filter(|et| et.label.is_some())
    }
}

/// A labeled character interval of the document text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Denotation {
    /// Cross-reference key used by relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The annotated interval.
    pub span: Span,

    /// A free-form label or an entity type identifier.
    #[serde(default)]
    pub obj: String,
}

impl Denotation {
    /// Creates a denotation without an id.
    pub fn new(begin: impl Into<Offset>, end: impl Into<Offset>, obj: impl Into<String>) -> Self {
        Self {
            id: None,
            span: Span::new(begin, end),
            obj: obj.into(),
        }
    }

    /// Sets the cross-reference id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The id, treating an empty string as absent.
    pub fn ref_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A directed, predicate-labeled link between two denotation ids.
///
/// Missing fields deserialize as empty strings so that incomplete relations
/// can be read and then filtered out rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default)]
    pub subj: String,
    #[serde(default)]
    pub pred: String,
    #[serde(default)]
    pub obj: String,
}

impl Relation {
    pub fn new(subj: impl Into<String>, pred: impl Into<String>, obj: impl Into<String>) -> Self {
        Self {
            subj: subj.into(),
            pred: pred.into(),
            obj: obj.into(),
        }
    }

    /// Returns true if subject, predicate and object are all present.
    pub fn is_complete(&self) -> bool {
        !self.subj.is_empty() && !self.pred.is_empty() && !self.obj.is_empty()
    }
}

/// Document configuration.
///
/// Only the entity type list is interpreted; other keys are carried through
/// untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(
        rename = "entity types",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub entity_types: Vec<EntityType>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// An entity type: a canonical identifier with an optional short label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EntityType {
    /// Creates a labeled entity type.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }

    /// Creates an entity type without a label.
    pub fn unlabeled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }
}
