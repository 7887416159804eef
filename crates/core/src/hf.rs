//! Pure helpers for the Hugging Face datasets-server `rows` API.
//!
//! The shell performs the HTTP requests; this module builds the URLs, plans
//! the page windows and turns the decoded pages into ordered input records.

use serde::{Deserialize, Serialize};

use crate::record::InputRecord;

pub const DATASETS_SERVER_BASE: &str = "https://datasets-server.huggingface.co";

/// The server refuses pages larger than this.
pub const MAX_PAGE_SIZE: usize = 100;

/// Which dataset split to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub dataset: String,
    pub config: String,
    pub split: String,
}

impl Default for DatasetRef {
    fn default() -> Self {
        Self {
            dataset: "AdaptLLM/finance-tasks".to_string(),
            config: "Headline".to_string(),
            split: "test".to_string(),
        }
    }
}

impl std::fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}/{}]", self.dataset, self.config, self.split)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowsResponse {
    pub rows: Vec<RowEntry>,
    pub num_rows_total: usize,
    #[serde(default)]
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowEntry {
    pub row_idx: usize,
    pub row: InputRecord,
    #[serde(default)]
    pub truncated_cells: Vec<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HfError {
    #[error("Row {row_idx} was truncated by the server (cells: {cells})")]
    TruncatedRow { row_idx: usize, cells: String },

    #[error("Expected {expected} rows but received {received}")]
    MissingRows { expected: usize, received: usize },

    #[error("Row {0} was returned more than once")]
    DuplicateRow(usize),
}

/// A page request: `length` rows starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub length: usize,
}

/// Build the `rows` endpoint URL for one page.
pub fn rows_url(base: &str, dataset: &DatasetRef, window: PageWindow) -> String {
    format!(
        "{}/rows?dataset={}&config={}&split={}&offset={}&length={}",
        base.trim_end_matches('/'),
        urlencoding::encode(&dataset.dataset),
        urlencoding::encode(&dataset.config),
        urlencoding::encode(&dataset.split),
        window.offset,
        window.length
    )
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: usize) -> usize {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Plan the page requests needed to cover rows `start..total`.
pub fn page_windows(start: usize, total: usize, page_size: usize) -> Vec<PageWindow> {
    let page_size = clamp_page_size(page_size);

    (start..total)
        .step_by(page_size)
        .map(|offset| PageWindow {
            offset,
            length: page_size.min(total - offset),
        })
        .collect()
}

/// Merge fetched pages into input records ordered by `row_idx`.
///
/// Every row in `0..total` must be present exactly once and none may be
/// truncated, otherwise the dataset would be silently altered.
pub fn collect_rows(pages: Vec<RowsResponse>, total: usize) -> Result<Vec<InputRecord>, HfError> {
    let mut entries: Vec<RowEntry> = pages.into_iter().flat_map(|page| page.rows).collect();
    entries.sort_by_key(|entry| entry.row_idx);

    for pair in entries.windows(2) {
        if pair[0].row_idx == pair[1].row_idx {
            return Err(HfError::DuplicateRow(pair[0].row_idx));
        }
    }

    if let Some(entry) = entries.iter().find(|e| !e.truncated_cells.is_empty()) {
        return Err(HfError::TruncatedRow {
            row_idx: entry.row_idx,
            cells: entry.truncated_cells.join(", "),
        });
    }

    let contiguous = entries
        .iter()
        .enumerate()
        .all(|(position, entry)| entry.row_idx == position);

    if entries.len() != total || !contiguous {
        return Err(HfError::MissingRows {
            expected: total,
            received: entries.len(),
        });
    }

    Ok(entries.into_iter().map(|entry| entry.row).collect())
}
