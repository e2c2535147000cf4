//! In-memory index builders shared by unit tests.

use rusqlite::{Connection, params};

use crate::space::{BLOCK_SEARCH_FTS5_SCHEMA, Space};

pub(crate) struct Row<'a> {
    pub id: &'a str,
    pub content: &'a str,
    pub entity_type: &'a str,
    pub custom_rank: i64,
    pub document_id: &'a str,
}

pub(crate) fn document<'a>(id: &'a str, title: &'a str) -> Row<'a> {
    Row {
        id,
        content: title,
        entity_type: "document",
        custom_rank: 0,
        document_id: id,
    }
}

pub(crate) fn block<'a>(id: &'a str, content: &'a str, document_id: &'a str) -> Row<'a> {
    Row {
        id,
        content,
        entity_type: "block",
        custom_rank: 0,
        document_id,
    }
}

pub(crate) fn fts_connection(rows: &[Row<'_>]) -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch(BLOCK_SEARCH_FTS5_SCHEMA).expect("create fts table");
    for row in rows {
        let exact = if row.entity_type == "document" {
            row.content
        } else {
            ""
        };
        conn.execute(
            "INSERT INTO BlockSearch(id, content, exactMatchContent, entityType, customRank, documentId) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![row.id, row.content, exact, row.entity_type, row.custom_rank, row.document_id],
        )
        .expect("insert fts row");
    }
    conn
}

pub(crate) fn plain_connection(rows: &[Row<'_>]) -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch(
        r"
        CREATE TABLE BlockSearch (
            id TEXT,
            content TEXT,
            entityType TEXT,
            customRank INTEGER,
            documentId TEXT
        );
        ",
    )
    .expect("create plain table");
    for row in rows {
        conn.execute(
            "INSERT INTO BlockSearch(id, content, entityType, customRank, documentId) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![row.id, row.content, row.entity_type, row.custom_rank, row.document_id],
        )
        .expect("insert plain row");
    }
    conn
}

pub(crate) fn fts_space(space_id: &str, rows: &[Row<'_>]) -> Space {
    Space::from_connection(space_id, fts_connection(rows)).expect("fts space")
}

pub(crate) fn plain_space(space_id: &str, rows: &[Row<'_>]) -> Space {
    Space::from_connection(space_id, plain_connection(rows)).expect("plain space")
}
