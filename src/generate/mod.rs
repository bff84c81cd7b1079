//! [`Document`] → inline markup.
//!
//! Generation resolves span conflicts, filters relations and then splices
//! `[span text][token]` pairs into the text from the last span to the first,
//! so earlier byte positions stay valid while later ones are rewritten.
//! Entity types that carry a label are appended as definition lines.

mod report;

pub use report::{GenerationCounts, GenerationIssue, GenerationIssueCode, GenerationReport};

use crate::document::{Denotation, Document, EntityType, Relation};
use crate::error::GenerateError;
use crate::resolve::{filter_relations, resolve_with_report};
use crate::token::AnnotationToken;

/// Renders a document as inline markup.
///
/// # Errors
///
/// Returns [`GenerateError::MissingText`] if the document text is empty.
pub fn generate(document: &Document) -> Result<String, GenerateError> {
    generate_with_report(document).map(|(markup, _)| markup)
}

/// Like [`generate`], but also reports every annotation left out of the
/// markup.
pub fn generate_with_report(
    document: &Document,
) -> Result<(String, GenerationReport), GenerateError> {
    if document.text.is_empty() {
        return Err(GenerateError::MissingText);
    }

    let text = document.text.as_str();
    let labeled: Vec<&EntityType> = document.labeled_entity_types().collect();

    let mut report = GenerationReport::new();
    report.input = GenerationCounts {
        denotations: document.denotations.len(),
        relations: document.relations.len(),
        entity_types: labeled.len(),
    };

    let resolution = resolve_with_report(document.denotations.clone(), text.chars().count());
    for dropped in &resolution.dropped {
        report.add(GenerationIssue::new(
            dropped.rule.into(),
            format!(
                "denotation {} \"{}\": {}",
                dropped.denotation.span, dropped.denotation.obj, dropped.rule
            ),
        ));
    }

    let relations = filter_relations(&document.relations);
    for relation in document.relations.iter().filter(|r| !r.is_complete()) {
        report.add(GenerationIssue::new(
            GenerationIssueCode::IncompleteRelation,
            format!(
                "relation (subj: \"{}\", pred: \"{}\", obj: \"{}\"): missing field",
                relation.subj, relation.pred, relation.obj
            ),
        ));
    }

    let mut rendered = vec![false; relations.len()];
    let boundaries = char_boundaries(text);
    let mut markup = text.to_string();

    // `resolve` returns spans ordered by begin; splice from the back.
    for denotation in resolution.kept.iter().rev() {
        let Some(range) = denotation.span.char_range() else {
            continue;
        };
        let bytes = boundaries[range.start]..boundaries[range.end];

        let display_obj = display_obj(&denotation.obj, &labeled);
        let token = build_token(denotation, display_obj, &relations, &mut rendered);

        let annotated = format!("[{}][{}]", &text[bytes.clone()], token);
        markup.replace_range(bytes, &annotated);
    }

    for (relation, rendered) in relations.iter().zip(&rendered) {
        if !rendered {
            tracing::debug!(
                subj = %relation.subj,
                pred = %relation.pred,
                obj = %relation.obj,
                "relation not attached to any rendered denotation"
            );
            report.add(GenerationIssue::new(
                GenerationIssueCode::UnattachedRelation,
                format!(
                    "relation (subj: \"{}\", pred: \"{}\", obj: \"{}\"): no rendered denotation with id \"{}\"",
                    relation.subj, relation.pred, relation.obj, relation.subj
                ),
            ));
        }
    }

    if !labeled.is_empty() {
        let definitions: Vec<String> = labeled
            .iter()
            .filter_map(|entity_type| {
                let label = entity_type.label.as_deref()?;
                Some(format!("[{}]: {}", label, entity_type.id))
            })
            .collect();
        markup.push_str("\n\n");
        markup.push_str(&definitions.join("\n"));
    }

    report.output = GenerationCounts {
        denotations: resolution.kept.len(),
        relations: rendered.iter().filter(|&&r| r).count(),
        entity_types: labeled.len(),
    };

    Ok((markup, report))
}

/// Byte offset of every char boundary, including the end of the text.
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// The label of the labeled entity type whose id is `obj`, or `obj` itself.
fn display_obj<'a>(obj: &'a str, labeled: &[&'a EntityType]) -> &'a str {
    labeled
        .iter()
        .find(|entity_type| entity_type.id == obj)
        .and_then(|entity_type| entity_type.label.as_deref())
        .unwrap_or(obj)
}

fn build_token<'a>(
    denotation: &'a Denotation,
    label: &'a str,
    relations: &[&'a Relation],
    rendered: &mut [bool],
) -> AnnotationToken<'a> {
    let Some(id) = denotation.ref_id() else {
        return AnnotationToken::PlainLabel { label };
    };

    match relations.iter().position(|relation| relation.subj == id) {
        Some(index) => {
            rendered[index] = true;
            let relation = relations[index];
            AnnotationToken::RelatedSpan {
                id,
                label,
                pred: &relation.pred,
                object: &relation.obj,
            }
        }
        None => AnnotationToken::LabeledSpan { id, label },
    }
}
