//! JSON serialization for annotated-text documents.
//!
//! This is the structured side of every conversion: `parse` produces a
//! [`Document`] that is written with these helpers, and `generate` consumes a
//! document read with them.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::model::Document;
use crate::error::SitaError;

/// Reads a document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_document_json(path: &Path) -> Result<Document, SitaError> {
    let file = File::open(path).map_err(SitaError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| SitaError::DocumentJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a document to a JSON file, pretty-printed and newline-terminated.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_document_json(path: &Path, document: &Document) -> Result<(), SitaError> {
    let file = File::create(path).map_err(SitaError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, document).map_err(|source| {
        SitaError::DocumentJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a document from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a document from a JSON byte slice.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn from_json_slice(bytes: &[u8]) -> Result<Document, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a document to a pretty-printed JSON string.
pub fn to_json_string(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Denotation, EntityType, Relation};

    fn sample_document() -> Document {
        Document::new("Elon Musk is a member of the PayPal Mafia.")
            .with_denotation(Denotation::new(0usize, 9usize, "https://example.com/Person").with_id("T1"))
            .with_denotation(
                Denotation::new(29usize, 41usize, "https://example.com/Organization").with_id("T2"),
            )
            .with_relation(Relation::new("T1", "member_of", "T2"))
            .with_entity_type(EntityType::new("https://example.com/Person", "Person"))
    }

    #[test]
    fn test_json_roundtrip() {
        let original = sample_document();

        let json = to_json_string(&original).expect("serialization failed");
        let restored = from_json_str(&json).expect("deserialization failed");

        assert_eq!(original, restored);
    }

    #[test]
    fn test_json_format() {
        let json = to_json_string(&sample_document()).expect("serialization failed");

        assert!(json.contains("\"denotations\""));
        assert!(json.contains("\"relations\""));
        assert!(json.contains("\"entity types\""));
        assert!(json.contains("\"begin\": 29"));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("doc.json");

        write_document_json(&path, &sample_document()).expect("write document");
        let restored = read_document_json(&path).expect("read document");

        assert_eq!(restored, sample_document());
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").expect("write fixture");

        let err = read_document_json(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
