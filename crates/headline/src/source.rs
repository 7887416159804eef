//! Input acquisition: local dataset files or the Hugging Face datasets server.

use crate::options::SourceOptions;
use crate::prelude::*;
use futures::stream::{self, StreamExt, TryStreamExt};
use headline_core::hf::{
    clamp_page_size, collect_rows, page_windows, rows_url, DatasetRef, PageWindow, RowsResponse,
};
use headline_core::InputRecord;
use indicatif::ProgressBar;
use std::path::Path;

/// Pages requested concurrently from the datasets server.
const CONCURRENT_PAGES: usize = 4;

/// Load every input record from the configured source, in dataset order.
pub async fn load_records(
    options: &SourceOptions,
    progress: Option<&ProgressBar>,
) -> Result<Vec<InputRecord>> {
    match &options.input {
        Some(path) => read_local(path),
        None => {
            fetch_remote(
                &options.server,
                &options.dataset_ref(),
                options.page_size,
                options.token.as_deref(),
                progress,
            )
            .await
        }
    }
}

pub fn read_local(path: &Path) -> Result<Vec<InputRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path.display()))?;

    let records = parse_records(&text)
        .with_context(|| format!("Failed to parse dataset file {}", path.display()))?;

    log::info!("Loaded {} records from {}", records.len(), path.display());

    Ok(records)
}

/// Parse a JSON array of records, or one record per line (blank lines ignored).
pub fn parse_records(text: &str) -> std::result::Result<Vec<InputRecord>, Error> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(|e| Error::InvalidRecord {
            line: e.line(),
            message: e.to_string(),
        });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| Error::InvalidRecord {
                line: idx + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

async fn fetch_remote(
    server: &str,
    dataset: &DatasetRef,
    page_size: usize,
    token: Option<&str>,
    progress: Option<&ProgressBar>,
) -> Result<Vec<InputRecord>> {
    let client = reqwest::Client::new();
    let page_size = clamp_page_size(page_size);

    if let Some(pb) = progress {
        pb.set_message(format!("Fetching {dataset}"));
    }

    let first = fetch_page(
        &client,
        server,
        dataset,
        PageWindow {
            offset: 0,
            length: page_size,
        },
        token,
    )
    .await?;

    let total = first.num_rows_total;
    if first.partial {
        log::warn!("Datasets server reports {dataset} as partial; rows may be missing");
    }

    if let Some(pb) = progress {
        pb.set_length(total as u64);
        pb.set_position(first.rows.len() as u64);
    }

    let remaining = page_windows(page_size.min(total), total, page_size);
    log::debug!("{dataset}: {total} rows, {} more pages", remaining.len());

    let client = &client;
    let mut pages = vec![first];
    let rest: Vec<RowsResponse> = stream::iter(remaining)
        .map(move |window| {
            async move {
                let page = fetch_page(client, server, dataset, window, token).await?;
                if let Some(pb) = progress {
                    pb.inc(page.rows.len() as u64);
                }
                Ok::<_, color_eyre::eyre::Report>(page)
            }
        })
        .buffered(CONCURRENT_PAGES)
        .try_collect()
        .await?;
    pages.extend(rest);

    let records = collect_rows(pages, total).map_err(|e| eyre!("{}: {}", dataset, e))?;
    log::info!("Fetched {} records from {dataset}", records.len());

    Ok(records)
}

async fn fetch_page(
    client: &reqwest::Client,
    server: &str,
    dataset: &DatasetRef,
    window: PageWindow,
    token: Option<&str>,
) -> Result<RowsResponse> {
    let url = rows_url(server, dataset, window);
    log::debug!("GET {url}");

    let mut request = client.get(&url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch rows at offset {}: {}", window.offset, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Http {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse rows at offset {}: {}", window.offset, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_json_lines() {
        let text = concat!(
            r#"{"id":"1","input":"Question: a","options":["Yes","No"],"gold_index":0,"class_id":"c"}"#,
            "\n\n",
            r#"{"id":"2","input":"Question: b","options":["Yes","No"],"gold_index":1,"class_id":"c"}"#,
            "\n"
        );

        let records = parse_records(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, json!("1"));
        assert_eq!(records[1].gold_index, 1);
    }

    #[test]
    fn test_parse_json_array() {
        let text = r#"
            [
                {"id": 1, "input": "x", "options": ["Yes"], "gold_index": 0, "class_id": 0},
                {"id": 2, "input": "y", "options": ["No"], "gold_index": 0, "class_id": 1}
            ]
        "#;

        let records = parse_records(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, json!(2));
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = concat!(
            r#"{"id":"1","input":"a","options":["Yes"],"gold_index":0,"class_id":"c"}"#,
            "\n",
            r#"{"id":"2","input":"b"}"#,
            "\n"
        );

        match parse_records(text).unwrap_err() {
            Error::InvalidRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_read_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"id":"9","input":"Question: q","options":["Yes"],"gold_index":0,"class_id":"c"}}"#
        )
        .unwrap();

        let records = read_local(file.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, json!("9"));
    }

    #[test]
    fn test_read_local_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_local(&dir.path().join("missing.jsonl")).is_err());
    }
}
