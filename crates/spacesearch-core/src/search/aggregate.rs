use tracing::debug;

use crate::error::Result;
use crate::models::ResultRecord;
use crate::query::SearchQuery;
use crate::space::SpaceSearcher;

/// Queries spaces in priority order, each with whatever is left of `budget`.
///
/// Returns one batch per queried space, aligned with `spaces` by position.
/// Spaces after the budget is exhausted are never queried and get no batch,
/// so the primary space cannot be crowded out by secondary ones. The first
/// failing space aborts the whole collection.
pub fn collect_results<S: SpaceSearcher>(
    spaces: &[S],
    query: &SearchQuery,
    budget: usize,
) -> Result<Vec<Vec<ResultRecord>>> {
    let mut batches = Vec::new();
    let mut collected = 0_usize;
    for space in spaces {
        let remaining = budget.saturating_sub(collected);
        if remaining == 0 {
            debug!(space_id = space.space_id(), "budget exhausted, skipping space");
            break;
        }
        let mut hits = space.search(query, remaining)?;
        hits.truncate(remaining);
        debug!(
            space_id = space.space_id(),
            limit = remaining,
            hits = hits.len(),
            "collected space results"
        );
        collected += hits.len();
        batches.push(hits);
    }
    Ok(batches)
}
