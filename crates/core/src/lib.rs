//! Core library for headline
//!
//! This crate implements the **Functional Core** of the headline converter,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`headline_core`** (this crate): Pure transformation functions with zero I/O
//! - **`headline`**: Dataset acquisition, file output and reporting (the Imperative Shell)
//!
//! Every function here is deterministic: the same input record always produces
//! the same output record, and no state is carried from one record to the next.
//! Run totals are accumulated by the caller through [`stats::RunStats`].
//!
//! # Module Organization
//!
//! - [`paragraph`]: Splits prompt text into blank-line delimited paragraphs
//! - [`question`]: Strips instructional prefixes from the target question
//! - [`record`]: Input/output records and the per-record transform
//! - [`stats`]: Run counters
//! - [`hf`]: Hugging Face datasets-server paging and row extraction
//!
//! # Example Usage
//!
//! ```rust
//! use headline_core::record::{transform, InputRecord};
//! use serde_json::json;
//!
//! let record = InputRecord {
//!     id: json!("42"),
//!     input: "Ex1 question\nEx1 answer\n\nQuestion: Is gold price rising?".to_string(),
//!     options: vec!["Yes".to_string(), "No".to_string()],
//!     gold_index: 0,
//!     class_id: json!("gold_price"),
//! };
//!
//! let output = transform(&record).unwrap();
//!
//! assert_eq!(output.example_qa, vec!["Ex1 question\nEx1 answer"]);
//! assert_eq!(output.question, "Is gold price rising?");
//! assert_eq!(output.answer, "Yes");
//! ```

pub mod hf;
pub mod paragraph;
pub mod question;
pub mod record;
pub mod stats;

pub use paragraph::split_paragraphs;
pub use question::{extract_question, PrefixConfig, QuestionExtractor};
pub use record::{transform, transform_with, EmptyInputPolicy, InputRecord, OutputRecord};
