#![allow(
    clippy::missing_errors_doc,
    reason = "every fallible function returns SearchError"
)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod models;
pub mod query;
pub mod search;
pub mod space;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::SearchSettings;
pub use discovery::{SearchIndex, discover_indexes, open_spaces};
pub use error::{ErrorPayload, Result, SearchError};
pub use models::{DEFAULT_RESULT_BUDGET, DOCUMENT_LABEL, EntityKind, ResultRecord};
pub use query::{SearchQuery, build_match_expression, normalize_terms};
pub use search::{search, search_with_budget};
pub use space::{BLOCK_SEARCH_FTS5_SCHEMA, QueryStrategy, Space, SpaceSearcher};
