//! Instructional prefix stripping for the final question paragraph.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Lead-in phrases recognized by default, matched case-insensitively.
pub const DEFAULT_PREFIXES: [&str; 2] = ["Now answer this question:", "Question:"];

static DEFAULT_EXTRACTOR: LazyLock<QuestionExtractor> = LazyLock::new(|| {
    QuestionExtractor::new(&PrefixConfig::default()).expect("default prefixes compile")
});

/// The set of instructional prefixes to strip and how to match them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixConfig {
    pub prefixes: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            case_sensitive: false,
        }
    }
}

/// A compiled [`PrefixConfig`].
///
/// Prefixes are matched literally at the start of the paragraph, in the order
/// they were configured, and consume any whitespace that follows them.
#[derive(Debug, Clone)]
pub struct QuestionExtractor {
    pattern: Option<Regex>,
}

impl QuestionExtractor {
    pub fn new(config: &PrefixConfig) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = config
            .prefixes
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| regex::escape(p))
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = RegexBuilder::new(&format!(r"\A(?:{})\s*", alternatives.join("|")))
            .case_insensitive(!config.case_sensitive)
            .build()?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Strip a recognized prefix from `paragraph` and return the trimmed rest.
    ///
    /// Paragraphs without a recognized prefix come back trimmed but otherwise
    /// unchanged. A paragraph that is nothing but a prefix yields `""`.
    pub fn extract(&self, paragraph: &str) -> String {
        let paragraph = paragraph.trim();

        match self.pattern.as_ref().and_then(|re| re.find(paragraph)) {
            Some(m) => paragraph[m.end()..].trim().to_string(),
            None => paragraph.to_string(),
        }
    }
}

/// Strip one of [`DEFAULT_PREFIXES`] from `paragraph`.
pub fn extract_question(paragraph: &str) -> String {
    DEFAULT_EXTRACTOR.extract(paragraph)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // extract_question tests
    // ============================================================================

    #[test]
    fn test_question_prefix() {
        assert_eq!(extract_question("Question: What is X?"), "What is X?");
    }

    #[test]
    fn test_now_answer_prefix_with_extra_whitespace() {
        assert_eq!(
            extract_question("Now answer this question:   What is Y?"),
            "What is Y?"
        );
    }

    #[test]
    fn test_prefix_followed_by_newline() {
        assert_eq!(
            extract_question("Now answer this question:\nDoes the news headline talk about price?"),
            "Does the news headline talk about price?"
        );
    }

    #[test]
    fn test_no_prefix_is_unchanged() {
        assert_eq!(extract_question("No prefix here."), "No prefix here.");
    }

    #[test]
    fn test_case_insensitive_by_default() {
        assert_eq!(extract_question("QUESTION: foo"), "foo");
        assert_eq!(extract_question("now ANSWER this question: bar"), "bar");
    }

    #[test]
    fn test_prefix_only_in_the_middle_is_kept() {
        assert_eq!(
            extract_question("Headline text. Question: is it?"),
            "Headline text. Question: is it?"
        );
    }

    #[test]
    fn test_only_the_first_prefix_is_removed() {
        assert_eq!(extract_question("Question: Question: twice"), "Question: twice");
    }

    #[test]
    fn test_degenerate_prefix_only_paragraph() {
        assert_eq!(extract_question("Question:"), "");
        assert_eq!(extract_question("Now answer this question:   "), "");
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(extract_question("   plain question?  "), "plain question?");
        assert_eq!(extract_question("  Question: padded  "), "padded");
    }

    #[test]
    fn test_prefix_without_space_after_colon() {
        assert_eq!(extract_question("Question:tight"), "tight");
    }

    // ============================================================================
    // QuestionExtractor configuration tests
    // ============================================================================

    #[test]
    fn test_custom_prefixes() {
        let extractor = QuestionExtractor::new(&PrefixConfig {
            prefixes: vec!["Q:".to_string(), "Headline:".to_string()],
            case_sensitive: false,
        })
        .unwrap();

        assert_eq!(extractor.extract("q: short"), "short");
        assert_eq!(extractor.extract("Headline: gold up"), "gold up");
        assert_eq!(extractor.extract("Question: untouched"), "Question: untouched");
    }

    #[test]
    fn test_case_sensitive_matching() {
        let extractor = QuestionExtractor::new(&PrefixConfig {
            case_sensitive: true,
            ..PrefixConfig::default()
        })
        .unwrap();

        assert_eq!(extractor.extract("Question: kept"), "kept");
        assert_eq!(extractor.extract("QUESTION: kept"), "QUESTION: kept");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let extractor = QuestionExtractor::new(&PrefixConfig {
            prefixes: vec!["(a+)?".to_string()],
            case_sensitive: true,
        })
        .unwrap();

        assert_eq!(extractor.extract("(a+)? literal"), "literal");
        assert_eq!(extractor.extract("aaa not a prefix"), "aaa not a prefix");
    }

    #[test]
    fn test_empty_prefix_set_only_trims() {
        let extractor = QuestionExtractor::new(&PrefixConfig {
            prefixes: vec![String::new()],
            case_sensitive: false,
        })
        .unwrap();

        assert_eq!(extractor.extract("  Question: stays  "), "Question: stays");
    }

    #[test]
    fn test_default_config() {
        let config = PrefixConfig::default();
        assert_eq!(config.prefixes, vec!["Now answer this question:", "Question:"]);
        assert!(!config.case_sensitive);
    }
}
