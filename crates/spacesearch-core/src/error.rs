use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query failed in space {space_id}: {source}")]
    QueryFailure {
        space_id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to decode row in space {space_id}: {source}")]
    ScanFailure {
        space_id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("document title lookup failed in space {space_id}: {source}")]
    ResolutionFailure {
        space_id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to open search index {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("no index files found in {}", .0.display())]
    NoIndexes(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
}

impl SearchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::QueryFailure { .. } => "QUERY_FAILURE",
            Self::ScanFailure { .. } => "SCAN_FAILURE",
            Self::ResolutionFailure { .. } => "RESOLUTION_FAILURE",
            Self::Open { .. } => "OPEN_FAILURE",
            Self::NoIndexes(_) => "NO_INDEXES",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Walk(_) => "DISCOVERY_ERROR",
        }
    }

    /// Short, user-facing headline for the failure. The full cause is
    /// available through `Display`.
    pub fn title(&self) -> &'static str {
        match self {
            Self::QueryFailure { .. } => "failed to query database",
            Self::ScanFailure { .. } => "failed to scan a row",
            Self::ResolutionFailure { .. } => "failed to look up document names",
            Self::Open { .. } => "failed to open search index",
            Self::NoIndexes(_) => "no index files found",
            Self::InvalidConfig(_) => "invalid configuration",
            Self::Walk(_) => "failed to read index directory",
        }
    }

    pub fn space_id(&self) -> Option<&str> {
        match self {
            Self::QueryFailure { space_id, .. }
            | Self::ScanFailure { space_id, .. }
            | Self::ResolutionFailure { space_id, .. } => Some(space_id),
            _ => None,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            title: self.title().to_string(),
            message: self.to_string(),
            space_id: self.space_id().map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_space_and_title() {
        let err = SearchError::QueryFailure {
            space_id: "space-a".to_string(),
            source: rusqlite::Error::InvalidQuery,
        };
        let payload = err.to_payload();
        assert_eq!(payload.code, "QUERY_FAILURE");
        assert_eq!(payload.title, "failed to query database");
        assert_eq!(payload.space_id.as_deref(), Some("space-a"));
        assert!(payload.message.contains("space-a"));

        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["code"], "QUERY_FAILURE");
    }

    #[test]
    fn collaborator_errors_have_no_space() {
        let err = SearchError::NoIndexes(PathBuf::from("/tmp/none"));
        assert_eq!(err.space_id(), None);
        assert_eq!(err.title(), "no index files found");
        let json = serde_json::to_value(err.to_payload()).expect("serialize payload");
        assert!(json.get("space_id").is_none());
    }
}
