use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::Result;
use crate::models::{DOCUMENT_LABEL, EntityKind, ResultRecord};
use crate::space::SpaceSearcher;

/// Fills `parent_document_name` on a copy of the collected batches and
/// flattens them in source order.
///
/// `batches[i]` holds the records produced by `spaces[i]`, so two sources
/// sharing a space ID still resolve against their own index. One title
/// lookup is issued per source that has blocks to resolve, carrying the
/// distinct parent IDs of those blocks. Documents get [`DOCUMENT_LABEL`];
/// blocks whose parent is not found get an empty name.
pub fn resolve_document_names<S: SpaceSearcher>(
    spaces: &[S],
    batches: &[Vec<ResultRecord>],
) -> Result<Vec<ResultRecord>> {
    let mut named = Vec::new();
    for (space, batch) in spaces.iter().zip(batches) {
        let titles = lookup_titles(space, batch)?;
        named.extend(batch.iter().map(|record| {
            let mut record = record.clone();
            record.parent_document_name = match record.kind {
                EntityKind::Document => DOCUMENT_LABEL.to_string(),
                EntityKind::Block => titles
                    .get(record.parent_document_id.as_str())
                    .cloned()
                    .unwrap_or_default(),
            };
            record
        }));
    }
    Ok(named)
}

fn lookup_titles<S: SpaceSearcher>(
    space: &S,
    batch: &[ResultRecord],
) -> Result<HashMap<String, String>> {
    let document_ids = distinct_parent_ids(batch);
    if document_ids.is_empty() {
        return Ok(HashMap::new());
    }
    debug!(
        space_id = space.space_id(),
        documents = document_ids.len(),
        "resolving document names"
    );
    Ok(space.document_titles(&document_ids)?.into_iter().collect())
}

fn distinct_parent_ids(batch: &[ResultRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    batch
        .iter()
        .filter(|record| record.needs_parent_name())
        .map(|record| record.parent_document_id.as_str())
        .filter(|document_id| seen.insert(*document_id))
        .collect()
}
