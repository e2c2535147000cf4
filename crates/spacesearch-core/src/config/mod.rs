use std::path::PathBuf;

use crate::error::{Result, SearchError};
use crate::models::DEFAULT_RESULT_BUDGET;

mod env;

pub const ENV_INDEX_PATH_DIR: &str = "INDEX_PATH_DIR";
pub const ENV_RESULT_LIMIT: &str = "SPACESEARCH_RESULT_LIMIT";
pub const ENV_LOG: &str = "SPACESEARCH_LOG";

pub const DEFAULT_INDEX_PATH_DIR: &str = "~/Library/Containers/com.lukilabs.lukiapp/Data/Library/Application Support/com.lukilabs.lukiapp/Search";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub index_dir: PathBuf,
    pub result_limit: usize,
    pub log_filter: String,
}

impl SearchSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            env::read_non_empty_env(ENV_INDEX_PATH_DIR).as_deref(),
            env::read_non_empty_env(ENV_RESULT_LIMIT).as_deref(),
            env::read_non_empty_env(ENV_LOG).as_deref(),
            std::env::var_os("HOME").map(PathBuf::from),
        )
    }

    fn from_values(
        index_dir: Option<&str>,
        result_limit: Option<&str>,
        log_filter: Option<&str>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let index_dir = expand_home(index_dir.unwrap_or(DEFAULT_INDEX_PATH_DIR), home)?;
        Ok(Self {
            index_dir,
            result_limit: env::parse_usize_or(result_limit, DEFAULT_RESULT_BUDGET, 1),
            log_filter: log_filter.unwrap_or(DEFAULT_LOG_FILTER).to_string(),
        })
    }
}

fn expand_home(raw: &str, home: Option<PathBuf>) -> Result<PathBuf> {
    let Some(rest) = raw.strip_prefix("~/") else {
        return Ok(PathBuf::from(raw));
    };
    let home = home.ok_or_else(|| {
        SearchError::InvalidConfig(format!(
            "{ENV_INDEX_PATH_DIR} starts with ~/ but HOME is not set"
        ))
    })?;
    Ok(home.join(rest))
}
