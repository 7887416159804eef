//! Arguments shared by the `build` and `show` subcommands.

use crate::prelude::*;
use headline_core::hf::{DatasetRef, DATASETS_SERVER_BASE, MAX_PAGE_SIZE};
use headline_core::{PrefixConfig, QuestionExtractor};
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct SourceOptions {
    /// Local dataset file, JSON Lines or a JSON array (takes precedence over --dataset)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Hugging Face dataset name
    #[arg(long, env = "HEADLINE_DATASET", default_value = "AdaptLLM/finance-tasks")]
    pub dataset: String,

    /// Dataset configuration
    #[arg(long, env = "HEADLINE_CONFIG", default_value = "Headline")]
    pub config: String,

    /// Dataset split
    #[arg(long, env = "HEADLINE_SPLIT", default_value = "test")]
    pub split: String,

    /// Rows requested per page from the datasets server (1-100)
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    pub page_size: usize,

    /// Datasets server base URL
    #[arg(long, env = "HEADLINE_DATASETS_SERVER", default_value = DATASETS_SERVER_BASE)]
    pub server: String,

    /// Hugging Face access token for gated datasets
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl SourceOptions {
    pub fn dataset_ref(&self) -> DatasetRef {
        DatasetRef {
            dataset: self.dataset.clone(),
            config: self.config.clone(),
            split: self.split.clone(),
        }
    }

    pub fn describe(&self) -> String {
        match &self.input {
            Some(path) => path.display().to_string(),
            None => format!("{} via {}", self.dataset_ref(), self.server),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct PrefixOptions {
    /// Instructional prefix to strip from the question (repeatable, replaces the defaults)
    #[arg(long = "prefix", value_name = "TEXT")]
    pub prefixes: Vec<String>,

    /// Match prefixes case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,
}

impl PrefixOptions {
    pub fn config(&self) -> PrefixConfig {
        let defaults = PrefixConfig::default();

        PrefixConfig {
            prefixes: if self.prefixes.is_empty() {
                defaults.prefixes
            } else {
                self.prefixes.clone()
            },
            case_sensitive: self.case_sensitive,
        }
    }

    pub fn extractor(&self) -> Result<QuestionExtractor> {
        QuestionExtractor::new(&self.config()).map_err(|e| eyre!("Invalid prefix set: {}", e))
    }
}
