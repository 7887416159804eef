//! Input and output records and the per-record transform.
//!
//! The transform is a pure function of one [`InputRecord`]: it never reads
//! shared state and never fabricates a field. Anything it cannot resolve is
//! reported as a [`TransformError`] and left to the caller's policy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::paragraph::split_paragraphs;
use crate::question::{extract_question, QuestionExtractor};

/// One benchmark sample as provided by the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub id: Value,
    pub input: String,
    pub options: Vec<String>,
    pub gold_index: i64,
    pub class_id: Value,
}

/// One flattened evaluation record.
///
/// Field order and key names are what downstream consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id: Value,
    #[serde(rename = "Example QA")]
    pub example_qa: Vec<String>,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
    #[serde(rename = "Class_id")]
    pub class_id: Value,
    #[serde(rename = "Options")]
    pub options: Vec<String>,
    pub labels: i64,
}

impl OutputRecord {
    /// Worked examples plus the target question.
    pub fn qa_pairs(&self) -> usize {
        self.example_qa.len() + 1
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Record {id} has no paragraphs in its input text")]
    EmptyInput { id: Value },

    #[error("Record {id} has gold_index {gold_index} but only {options} options")]
    BadGoldIndex {
        id: Value,
        gold_index: i64,
        options: usize,
    },

    #[error("Failed to serialize record: {0}")]
    Serialize(String),
}

/// What the driver does with a record whose input text is entirely blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyInputPolicy {
    /// Exclude the record, warn, and keep going.
    #[default]
    Skip,
    /// Treat the record as a fatal error.
    Abort,
}

impl EmptyInputPolicy {
    /// Whether `error` should be skipped instead of aborting the run.
    ///
    /// Only [`TransformError::EmptyInput`] is ever skippable.
    pub fn skips(&self, error: &TransformError) -> bool {
        matches!(
            (self, error),
            (EmptyInputPolicy::Skip, TransformError::EmptyInput { .. })
        )
    }
}

/// Transform a record using the default instructional prefixes.
pub fn transform(record: &InputRecord) -> Result<OutputRecord, TransformError> {
    build_output(record, extract_question)
}

/// Transform a record using a custom prefix configuration.
pub fn transform_with(
    record: &InputRecord,
    extractor: &QuestionExtractor,
) -> Result<OutputRecord, TransformError> {
    build_output(record, |paragraph| extractor.extract(paragraph))
}

fn build_output<F>(record: &InputRecord, extract: F) -> Result<OutputRecord, TransformError>
where
    F: Fn(&str) -> String,
{
    let mut paragraphs = split_paragraphs(&record.input);

    // Everything before the last paragraph is a worked example.
    let last = paragraphs.pop().ok_or_else(|| TransformError::EmptyInput {
        id: record.id.clone(),
    })?;

    let answer = resolve_answer(record)?;

    Ok(OutputRecord {
        id: record.id.clone(),
        example_qa: paragraphs,
        question: extract(&last),
        answer,
        class_id: record.class_id.clone(),
        options: record.options.clone(),
        labels: record.gold_index,
    })
}

fn resolve_answer(record: &InputRecord) -> Result<String, TransformError> {
    usize::try_from(record.gold_index)
        .ok()
        .and_then(|index| record.options.get(index))
        .cloned()
        .ok_or_else(|| TransformError::BadGoldIndex {
            id: record.id.clone(),
            gold_index: record.gold_index,
            options: record.options.len(),
        })
}

/// Serialize a record as one compact JSON line, without the trailing newline.
///
/// Non-ASCII text is emitted as-is, not `\u` escaped.
pub fn to_json_line(record: &OutputRecord) -> Result<String, TransformError> {
    serde_json::to_string(record).map_err(|e| TransformError::Serialize(e.to_string()))
}
