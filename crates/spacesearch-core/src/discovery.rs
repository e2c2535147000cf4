use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SearchError};
use crate::space::Space;

const INDEX_FILE_PREFIX: &str = "SearchIndex_";
const INDEX_FILE_SUFFIX: &str = ".sqlite";
const SPACE_SEPARATOR: &str = "||";

/// One index file found on disk. Secondary spaces are stored as
/// `SearchIndex_<primary>||<secondary>.sqlite`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex {
    pub space_id: String,
    pub is_primary: bool,
    pub path: PathBuf,
}

impl SearchIndex {
    pub fn open(&self) -> Result<Space> {
        Space::open(self.space_id.clone(), &self.path)
    }
}

/// Lists index files in `dir`, primary spaces first, each group by file name.
pub fn discover_indexes(dir: &Path) -> Result<Vec<SearchIndex>> {
    let mut indexes = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if let Some((space_id, is_primary)) = parse_index_file_name(file_name) {
            indexes.push(SearchIndex {
                space_id,
                is_primary,
                path: entry.into_path(),
            });
        }
    }

    if indexes.is_empty() {
        return Err(SearchError::NoIndexes(dir.to_path_buf()));
    }
    indexes.sort_by_key(|index| !index.is_primary);
    Ok(indexes)
}

pub fn open_spaces(indexes: &[SearchIndex]) -> Result<Vec<Space>> {
    indexes.iter().map(SearchIndex::open).collect()
}

fn parse_index_file_name(file_name: &str) -> Option<(String, bool)> {
    let name = file_name
        .strip_prefix(INDEX_FILE_PREFIX)?
        .strip_suffix(INDEX_FILE_SUFFIX)?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '|');
    if !valid {
        return None;
    }
    let is_primary = !name.contains(SPACE_SEPARATOR);
    let space_id = name.rsplit(SPACE_SEPARATOR).next()?;
    if space_id.is_empty() {
        return None;
    }
    Some((space_id.to_string(), is_primary))
}
