use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params_from_iter, types::Value};
use tracing::debug;

use crate::error::{Result, SearchError};
use crate::models::{EntityKind, ResultRecord};
use crate::query::SearchQuery;


const SEARCH_TABLE: &str = "BlockSearch";

/// DDL of the FTS5 `BlockSearch` layout the [`QueryStrategy::Fts5Match`]
/// queries read. Indexes are written by the desktop app; this is the shape
/// they are expected to have.
pub const BLOCK_SEARCH_FTS5_SCHEMA: &str = r"
CREATE VIRTUAL TABLE BlockSearch USING fts5(
    id UNINDEXED,
    content,
    exactMatchContent,
    entityType UNINDEXED,
    customRank UNINDEXED,
    documentId UNINDEXED
);
";

const FTS_MATCH_SQL: &str = "SELECT id, content, entityType, documentId FROM BlockSearch WHERE BlockSearch MATCH ?1 ORDER BY rank + customRank LIMIT ?2";
const FTS_BROWSE_SQL: &str =
    "SELECT id, content, entityType, documentId FROM BlockSearch ORDER BY customRank LIMIT ?1";
const SUBSTRING_BROWSE_SQL: &str =
    "SELECT id, content, entityType, documentId FROM BlockSearch LIMIT ?1";

/// The "search with a limit" capability every configured space offers.
///
/// Implementations must return at most `limit` records and issue no query
/// at all when `limit` is zero.
pub trait SpaceSearcher {
    fn space_id(&self) -> &str;

    fn search(&self, query: &SearchQuery, limit: usize) -> Result<Vec<ResultRecord>>;

    /// Returns `(document_id, title)` pairs for the given document IDs in a
    /// single lookup. Unknown IDs are simply absent from the output.
    fn document_titles(&self, document_ids: &[&str]) -> Result<Vec<(String, String)>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStrategy {
    /// `BlockSearch` is an FTS5 table; terms go through a match expression.
    Fts5Match,
    /// Plain table; terms are lowercase `LIKE` filters over `utf8lower`.
    Substring,
}

impl QueryStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fts5Match => "fts5",
            Self::Substring => "substring",
        }
    }
}

/// One search index plus the strategy detected for it. The connection
/// lives as long as the `Space` and is never reconfigured by a search.
pub struct Space {
    id: String,
    conn: Connection,
    strategy: QueryStrategy,
}

impl std::fmt::Debug for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Space")
            .field("id", &self.id)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl Space {
    pub fn open(space_id: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_failure = |source| SearchError::Open {
            path: path.to_path_buf(),
            source,
        };
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(open_failure)?;
        let strategy = prepare_connection(&conn).map_err(open_failure)?;
        Ok(Self {
            id: space_id.into(),
            conn,
            strategy,
        })
    }

    /// Wraps an already open connection. Failures to inspect its schema are
    /// reported as query failures of `space_id`.
    pub fn from_connection(space_id: impl Into<String>, conn: Connection) -> Result<Self> {
        let id = space_id.into();
        let strategy = prepare_connection(&conn).map_err(|source| SearchError::QueryFailure {
            space_id: id.clone(),
            source,
        })?;
        Ok(Self { id, conn, strategy })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn strategy(&self) -> QueryStrategy {
        self.strategy
    }

    fn query_failure(&self, source: rusqlite::Error) -> SearchError {
        SearchError::QueryFailure {
            space_id: self.id.clone(),
            source,
        }
    }

    fn collect_records(&self, sql: &str, values: Vec<Value>) -> Result<Vec<ResultRecord>> {
        let mut stmt = self.conn.prepare(sql).map_err(|e| self.query_failure(e))?;
        let mut rows = stmt
            .query(params_from_iter(values.iter()))
            .map_err(|e| self.query_failure(e))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| self.query_failure(e))? {
            let record = self
                .scan_record(row)
                .map_err(|source| SearchError::ScanFailure {
                    space_id: self.id.clone(),
                    source,
                })?;
            out.push(record);
        }
        Ok(out)
    }

    fn scan_record(&self, row: &Row<'_>) -> rusqlite::Result<ResultRecord> {
        let kind = EntityKind::from_storage(row.get::<_, Option<String>>(2)?.as_deref());
        let parent_document_id = match kind {
            EntityKind::Document => String::new(),
            EntityKind::Block => row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        };
        Ok(ResultRecord {
            id: row.get(0)?,
            space_id: self.id.clone(),
            content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            kind,
            parent_document_id,
            parent_document_name: String::new(),
        })
    }

    fn substring_sql(term_count: usize) -> String {
        let filters = (1..=term_count)
            .map(|idx| format!("utf8lower(ifnull(content, '')) LIKE ?{idx}"))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(
            "SELECT id, content, entityType, documentId FROM BlockSearch WHERE {filters} LIMIT ?{}",
            term_count + 1
        )
    }
}

impl SpaceSearcher for Space {
    fn space_id(&self) -> &str {
        &self.id
    }

    fn search(&self, query: &SearchQuery, limit: usize) -> Result<Vec<ResultRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let limit_value = Value::Integer(usize_to_i64_saturating(limit));
        debug!(
            space_id = %self.id,
            limit,
            strategy = self.strategy.as_str(),
            browse = query.is_browse(),
            "searching space"
        );

        match (self.strategy, query.is_browse()) {
            (QueryStrategy::Fts5Match, true) => {
                self.collect_records(FTS_BROWSE_SQL, vec![limit_value])
            }
            (QueryStrategy::Fts5Match, false) => self.collect_records(
                FTS_MATCH_SQL,
                vec![
                    Value::Text(query.match_expression().to_string()),
                    limit_value,
                ],
            ),
            (QueryStrategy::Substring, true) => {
                self.collect_records(SUBSTRING_BROWSE_SQL, vec![limit_value])
            }
            (QueryStrategy::Substring, false) => {
                let mut values = query
                    .terms()
                    .iter()
                    .map(|term| Value::Text(format!("%{}%", term.to_lowercase())))
                    .collect::<Vec<_>>();
                values.push(limit_value);
                self.collect_records(&Self::substring_sql(query.terms().len()), values)
            }
        }
    }

    fn document_titles(&self, document_ids: &[&str]) -> Result<Vec<(String, String)>> {
        if document_ids.is_empty() {
            return Ok(Vec::new());
        }
        let resolution_failure = |source| SearchError::ResolutionFailure {
            space_id: self.id.clone(),
            source,
        };

        let placeholders = (1..=document_ids.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT documentId, content FROM BlockSearch WHERE entityType = 'document' AND documentId IN ({placeholders})"
        );
        let mut stmt = self.conn.prepare(&sql).map_err(resolution_failure)?;
        let rows = stmt
            .query_map(params_from_iter(document_ids.iter()), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                ))
            })
            .map_err(resolution_failure)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(resolution_failure)?);
        }
        Ok(out)
    }
}

/// Detects the strategy for `conn` and installs what that strategy needs.
/// Unreadable files (not a database, corrupt header) fail here, since
/// opening is lazy.
fn prepare_connection(conn: &Connection) -> rusqlite::Result<QueryStrategy> {
    let strategy = detect_strategy(conn)?;
    if strategy == QueryStrategy::Substring {
        register_utf8lower(conn)?;
    }
    Ok(strategy)
}

fn detect_strategy(conn: &Connection) -> rusqlite::Result<QueryStrategy> {
    let sql = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE name = ?1",
            [SEARCH_TABLE],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?
        .flatten();
    let is_fts5 = sql.is_some_and(|sql| sql.to_ascii_lowercase().contains("using fts5"));
    Ok(if is_fts5 {
        QueryStrategy::Fts5Match
    } else {
        QueryStrategy::Substring
    })
}

/// Unicode-aware lowercase used by the substring strategy; SQLite's
/// built-in `lower()` only folds ASCII.
fn register_utf8lower(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "utf8lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|value| value.to_lowercase())),
    )
}

fn usize_to_i64_saturating(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
