//! Relation filtering.

use crate::document::Relation;

/// Returns the relations that have a subject, a predicate and an object.
///
/// Whether `subj` and `obj` name existing denotations is not checked here;
/// relations pointing at unknown ids are kept as written.
pub fn filter_relations(relations: &[Relation]) -> Vec<&Relation> {
    relations
        .iter()
        .filter(|relation| {
            let complete = relation.is_complete();
            if !complete {
                tracing::debug!(
                    subj = %relation.subj,
                    pred = %relation.pred,
                    obj = %relation.obj,
                    "dropping incomplete relation"
                );
            }
            complete
        })
        .collect()
}
