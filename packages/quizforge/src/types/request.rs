//! Generation request and orchestrator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::page::{DocumentBlob, PageText};
use super::question::QuestionKind;

/// Advisory split of difficulties, as percentages.
///
/// Passed through to the generation instructions; never enforced as a
/// hard constraint on the output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyMix {
    pub easy: u8,
    pub medium: u8,
    pub hard: u8,
}

impl Default for DifficultyMix {
    fn default() -> Self {
        Self {
            easy: 40,
            medium: 40,
            hard: 20,
        }
    }
}

/// A request to generate questions from one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Name of the source document (cited in output metadata)
    pub source_name: String,

    /// Extracted per-page text. May be empty when the document is passed
    /// opaquely via `document`; evidence validation is skipped in that case.
    #[serde(default)]
    pub page_texts: Vec<PageText>,

    /// Raw document forwarded to the generation service when no page
    /// text is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentBlob>,

    /// Exact number of questions the caller wants back
    pub desired_count: usize,

    /// Question kinds the service may produce (non-empty)
    pub allowed_kinds: Vec<QuestionKind>,

    /// Advisory difficulty split
    #[serde(default)]
    pub difficulty_mix: DifficultyMix,
}

impl GenerationRequest {
    /// Create a request with all kinds allowed and the default mix.
    pub fn new(source_name: impl Into<String>, desired_count: usize) -> Self {
        Self {
            source_name: source_name.into(),
            page_texts: vec![],
            document: None,
            desired_count,
            allowed_kinds: vec![
                QuestionKind::SingleSelect,
                QuestionKind::MultiSelect,
                QuestionKind::FreeText,
            ],
            difficulty_mix: DifficultyMix::default(),
        }
    }

    /// Attach extracted page text.
    pub fn with_pages(mut self, pages: impl IntoIterator<Item = PageText>) -> Self {
        self.page_texts = pages.into_iter().collect();
        self
    }

    /// Attach a raw document blob.
    pub fn with_document(mut self, document: DocumentBlob) -> Self {
        self.document = Some(document);
        self
    }

    /// Restrict the allowed question kinds.
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = QuestionKind>) -> Self {
        self.allowed_kinds = kinds.into_iter().collect();
        self
    }

    /// Set the advisory difficulty mix.
    pub fn with_difficulty_mix(mut self, mix: DifficultyMix) -> Self {
        self.difficulty_mix = mix;
        self
    }
}

/// Configuration for the generation orchestrator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum service rounds per request. Default: 5.
    pub max_rounds: usize,

    /// Attempts per service call before the round is abandoned. Default: 3.
    pub max_attempts: usize,

    /// Backoff base; doubles per failed attempt. Default: 300 ms.
    pub backoff_base: Duration,

    /// Maximum previously seen prompts forwarded as exclusions. Default: 50.
    pub exclusion_limit: usize,

    /// Skip the generation service entirely and fabricate every question
    /// from the source vocabulary. Default: false.
    pub synthetic_only: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            max_attempts: 3,
            backoff_base: Duration::from_millis(300),
            exclusion_limit: 50,
            synthetic_only: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the round cap.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the per-call attempt cap.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the backoff base duration.
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Enable synthetic-only mode (no service calls).
    pub fn synthetic_only(mut self) -> Self {
        self.synthetic_only = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_match_caps() {
        let config = GeneratorConfig::default();
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff_base, Duration::from_millis(300));
        assert_eq!(config.exclusion_limit, 50);
        assert!(!config.synthetic_only);
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("deck.pdf", 5)
            .with_pages([PageText::new(1, "alpha beta")])
            .with_kinds([QuestionKind::SingleSelect]);
        assert_eq!(request.page_texts.len(), 1);
        assert_eq!(request.allowed_kinds, vec![QuestionKind::SingleSelect]);
    }
}
