use tracing::info;

use crate::error::Result;
use crate::models::{DEFAULT_RESULT_BUDGET, ResultRecord};
use crate::query::SearchQuery;
use crate::space::SpaceSearcher;

mod aggregate;
mod order;
mod resolve;


pub use aggregate::collect_results;
pub use order::order_results;
pub use resolve::resolve_document_names;

/// Searches `spaces` (primary first) for `terms` within the default budget.
pub fn search<S, T>(spaces: &[S], terms: &[T]) -> Result<Vec<ResultRecord>>
where
    S: SpaceSearcher,
    T: AsRef<str>,
{
    search_with_budget(spaces, terms, DEFAULT_RESULT_BUDGET)
}

pub fn search_with_budget<S, T>(
    spaces: &[S],
    terms: &[T],
    budget: usize,
) -> Result<Vec<ResultRecord>>
where
    S: SpaceSearcher,
    T: AsRef<str>,
{
    let query = SearchQuery::new(terms);
    let batches = collect_results(spaces, &query, budget)?;
    let named = resolve_document_names(spaces, &batches)?;
    let ordered = order_results(named);
    info!(
        terms = query.terms().len(),
        spaces = spaces.len(),
        results = ordered.len(),
        budget,
        "search finished"
    );
    Ok(ordered)
}
