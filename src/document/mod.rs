//! Structured representation of annotated-text documents.
//!
//! A [`Document`] is the structured side of the conversion: plain text, a
//! list of [`Denotation`]s (labeled character spans), [`Relation`]s between
//! denotation ids, and an optional entity type dictionary in [`Config`].
//!
//! # Design Principles
//!
//! 1. **Wire compatibility**: field names and nesting match the established
//!    JSON layout, so existing documents read and write unchanged.
//!
//! 2. **Permissive Construction**: spans may carry fractional, negative or
//!    inverted offsets and relations may miss fields. Generation filters these
//!    out instead of failing to read the document.
//!
//! # Example
//!
//! ```
//! use sita::document::{Denotation, Document, Relation};
//!
//! let document = Document::new("Elon Musk is a member of the PayPal Mafia.")
//!     .with_denotation(Denotation::new(0usize, 9usize, "Person").with_id("T1"))
//!     .with_denotation(Denotation::new(29usize, 41usize, "Organization").with_id("T2"))
//!     .with_relation(Relation::new("T1", "member_of", "T2"));
//!
//! assert_eq!(document.denotations.len(), 2);
//! ```

pub mod io_json;
mod model;
mod span;

pub use model::{Config, Denotation, Document, EntityType, Relation};
pub use span::{Offset, Span};
