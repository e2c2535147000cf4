use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of records one search returns across all spaces.
pub const DEFAULT_RESULT_BUDGET: usize = 40;

/// Name given to document rows in place of a parent title lookup.
pub const DOCUMENT_LABEL: &str = "Document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Document,
    Block,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Block => "block",
        }
    }

    /// Maps the stored `entityType` column. Anything that is not a document
    /// is addressed as a block.
    #[must_use]
    pub fn from_storage(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("document") => Self::Document,
            _ => Self::Block,
        }
    }

    /// Sort key for result ordering: documents before blocks.
    #[must_use]
    pub const fn display_rank(self) -> u8 {
        match self {
            Self::Document => 0,
            Self::Block => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: String,
    pub space_id: String,
    pub content: String,
    pub kind: EntityKind,
    /// Empty for documents.
    pub parent_document_id: String,
    /// Empty until names are resolved.
    pub parent_document_name: String,
}

impl ResultRecord {
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.kind == EntityKind::Document
    }

    #[must_use]
    pub fn needs_parent_name(&self) -> bool {
        self.kind == EntityKind::Block && !self.parent_document_id.is_empty()
    }
}
