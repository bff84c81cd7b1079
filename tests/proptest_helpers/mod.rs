#![allow(dead_code)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use sita::document::{Denotation, Document, EntityType, Offset, Relation, Span};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Text with no markup metacharacters, newlines or surrounding whitespace.
pub fn arb_text() -> BoxedStrategy<String> {
    "[a-z][a-z ,.]{0,40}[a-z]".boxed()
}

/// A label, id or predicate that survives a trip through a token.
pub fn arb_word() -> BoxedStrategy<String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}".boxed()
}

/// Any offset a document may carry, including ones the resolver rejects.
pub fn arb_offset(text_len: usize) -> BoxedStrategy<Offset> {
    let max = text_len as i64 + 5;
    prop_oneof![
        8 => (0..=max).prop_map(Offset::Index),
        1 => (-5i64..0).prop_map(Offset::Index),
        1 => (0.0..max as f64).prop_map(Offset::Fraction),
    ]
    .boxed()
}

/// Arbitrary, possibly conflicting denotations for a text of `text_len` chars.
pub fn arb_raw_denotations(text_len: usize, max: usize) -> BoxedStrategy<Vec<Denotation>> {
    prop::collection::vec(
        (arb_offset(text_len), arb_offset(text_len), arb_word()).prop_map(|(begin, end, obj)| {
            Denotation {
                id: None,
                span: Span { begin, end },
                obj,
            }
        }),
        0..max,
    )
    .boxed()
}

/// A document whose spans are non-empty and in bounds, but may still
/// overlap, with ids, relations and labeled entity types.
pub fn arb_document() -> BoxedStrategy<Document> {
    arb_text()
        .prop_flat_map(|text| {
            let len = text.chars().count();
            let spans = prop::collection::vec((0..len, 1..=len), 0..6).prop_map(move |pairs| {
                pairs
                    .into_iter()
                    .map(|(begin, width)| (begin, (begin + width).min(len)))
                    .collect::<Vec<_>>()
            });
            (
                Just(text),
                spans,
                prop::collection::vec(arb_word(), 6),
                prop::collection::vec(any::<bool>(), 6),
                prop::collection::vec((0..6usize, arb_word(), 0..6usize), 0..4),
                prop::collection::btree_set(arb_word(), 0..3),
            )
        })
        .prop_map(|(text, spans, objs, with_id, relations, labels)| {
            let mut document = Document::new(text);

            for (i, (begin, end)) in spans.iter().enumerate() {
                let mut denotation = Denotation::new(*begin, *end, objs[i].clone());
                if with_id[i] {
                    denotation = denotation.with_id(format!("T{}", i + 1));
                }
                document = document.with_denotation(denotation);
            }

            for (subj, pred, obj) in relations {
                document = document.with_relation(Relation::new(
                    format!("T{}", subj + 1),
                    pred,
                    format!("T{}", obj + 1),
                ));
            }

            for entity_type in arb_labeled_entity_types(&labels, &objs) {
                document = document.with_entity_type(entity_type);
            }

            document
        })
        .boxed()
}

/// Labeled entity types whose ids are URL-like and never equal a label.
///
/// A label that is also used as a plain obj maps to an id only through
/// its own entry, so labels and objs are kept disjoint.
fn arb_labeled_entity_types(labels: &BTreeSet<String>, objs: &[String]) -> Vec<EntityType> {
    labels
        .iter()
        .filter(|label| !objs.contains(label))
        .map(|label| EntityType::new(format!("https://example.com/{}", label), label.clone()))
        .collect()
}
