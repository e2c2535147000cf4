//! Launcher script-filter output: `{"items": [...]}`.

use serde::Serialize;
use spacesearch_core::{ResultRecord, SearchError};

const WARNING_ICON: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/AlertCautionIcon.icns";
const UNKNOWN_ERROR_TITLE: &str = "Unknown error";
const NO_RESULTS_TITLE: &str = "No results";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Feedback {
    pub(crate) items: Vec<Item>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) uid: Option<String>,
    pub(crate) title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) arg: Option<String>,
    pub(crate) valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) icon: Option<Icon>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Icon {
    pub(crate) path: String,
}

impl Item {
    fn record(record: &ResultRecord) -> Self {
        Self {
            uid: Some(record.id.clone()),
            title: record.content.clone(),
            subtitle: record.parent_document_name.clone(),
            arg: Some(format!(
                "craftdocs://open?blockId={}&spaceId={}",
                record.id, record.space_id
            )),
            valid: true,
            icon: None,
        }
    }

    fn create_document(primary_space: &str, query: &str) -> Self {
        let title = format!("Create {query:?}");
        Self {
            uid: Some(title.clone()),
            title,
            subtitle: String::new(),
            arg: Some(format!(
                "craftdocs://createdocument?spaceId={primary_space}&title={}&content=&folderId=",
                urlencoding::encode(query)
            )),
            valid: true,
            icon: None,
        }
    }

    fn notice(title: &str) -> Self {
        Self {
            uid: None,
            title: title.to_string(),
            subtitle: String::new(),
            arg: None,
            valid: false,
            icon: None,
        }
    }

    fn warning(title: &str, detail: String) -> Self {
        Self {
            uid: None,
            title: title.to_string(),
            subtitle: detail,
            arg: None,
            valid: false,
            icon: Some(Icon {
                path: WARNING_ICON.to_string(),
            }),
        }
    }
}

/// Records arrive documents first. The "create document" entry sits between
/// the documents and the first block.
pub(crate) fn build_feedback(records: &[ResultRecord], primary_space: &str, query: &str) -> Feedback {
    let query = query.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut items = Vec::with_capacity(records.len() + 1);
    let mut create_added = primary_space.is_empty();

    for record in records {
        if !create_added && !record.is_document() {
            items.push(Item::create_document(primary_space, &query));
            create_added = true;
        }
        items.push(Item::record(record));
    }
    if !create_added {
        items.push(Item::create_document(primary_space, &query));
    }
    if items.is_empty() {
        items.push(Item::notice(NO_RESULTS_TITLE));
    }
    Feedback { items }
}

pub(crate) fn warning_feedback(err: &anyhow::Error) -> Feedback {
    let title = err
        .downcast_ref::<SearchError>()
        .map_or(UNKNOWN_ERROR_TITLE, SearchError::title);
    Feedback {
        items: vec![Item::warning(title, format!("{err:#}"))],
    }
}
