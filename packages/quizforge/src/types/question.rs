//! Question and quiz types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The shape of a generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Exactly one correct choice among at least two
    SingleSelect,

    /// At least two correct choices among at least three
    MultiSelect,

    /// Free-text answer matched against accepted strings
    FreeText,
}

impl QuestionKind {
    /// Wire name used in prompts and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
            Self::FreeText => "free_text",
        }
    }

    /// Parse a wire name leniently; unknown values fall back to single-select.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "multi_select" | "multiple_choice" => Self::MultiSelect,
            "free_text" | "short_answer" => Self::FreeText,
            _ => Self::SingleSelect,
        }
    }
}

/// Advisory difficulty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a wire name leniently; unknown values fall back to easy.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }

    /// Cycle easy -> medium -> hard by index (synthetic generation).
    pub fn cycle(index: usize) -> Self {
        match index % 3 {
            0 => Self::Easy,
            1 => Self::Medium,
            _ => Self::Hard,
        }
    }
}

/// One selectable choice of a select-kind question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Opaque choice identifier
    pub id: String,

    /// Display text
    pub text: String,

    /// Whether this choice is correct
    #[serde(default)]
    pub is_correct: bool,
}

impl Choice {
    /// Create a choice with a fresh identifier.
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_correct,
        }
    }
}

/// Page citations plus verbatim snippets supporting a question.
///
/// Invariant (checked by the evidence validator, not the constructor):
/// every snippet must be fuzzy-locatable on at least one cited page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    /// 1-based page numbers the question cites
    pub page_numbers: Vec<u32>,

    /// 1-3 short verbatim quotes from the cited pages
    pub snippets: Vec<String>,
}

impl Evidence {
    /// Create evidence from pages and snippets.
    pub fn new(
        page_numbers: impl IntoIterator<Item = u32>,
        snippets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            page_numbers: page_numbers.into_iter().collect(),
            snippets: snippets.into_iter().map(|s| s.into()).collect(),
        }
    }
}

/// A generated exam question.
///
/// Created by the response parser or the synthetic fallback, then either
/// kept or discarded by validation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque unique identifier
    pub id: String,

    /// Question shape
    pub kind: QuestionKind,

    /// Advisory difficulty
    pub difficulty: Difficulty,

    /// The question text (non-empty, >= 3 chars)
    pub prompt: String,

    /// Choices for select kinds (empty for free-text)
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Accepted answers for free-text (empty for select kinds)
    #[serde(default)]
    pub accepted_answers: Vec<String>,

    /// Optional explanation shown after answering
    #[serde(default)]
    pub explanation: Option<String>,

    /// Grounding citations
    pub evidence: Evidence,

    /// Topic labels; synthetic fallback items carry [`SYNTHETIC_TAG`]
    #[serde(default)]
    pub topic_tags: Vec<String>,
}

/// Topic tag marking synthetic top-up questions.
pub const SYNTHETIC_TAG: &str = "synthetic";

impl Question {
    /// Normalized dedup key: trimmed, lower-cased prompt text.
    pub fn prompt_key(&self) -> String {
        self.prompt.trim().to_lowercase()
    }

    /// Whether this question came from the synthetic fallback.
    pub fn is_synthetic(&self) -> bool {
        self.topic_tags.iter().any(|t| t == SYNTHETIC_TAG)
    }
}

/// Publication state of a quiz set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    Draft,
    Published,
}

/// A stored set of generated questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSet {
    /// Opaque unique identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Name of the source document
    pub source_name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// The generated questions
    pub questions: Vec<Question>,

    /// Draft until explicitly published
    pub status: QuizStatus,
}

impl QuizSet {
    /// Create a new draft quiz set with a fresh identifier.
    pub fn new(
        title: impl Into<String>,
        source_name: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            source_name: source_name.into(),
            created_at: Utc::now(),
            questions,
            status: QuizStatus::Draft,
        }
    }

    /// Number of questions in the set.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Create a draft copy with a fresh identifier and "(Copy)" suffix.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: format!("{} (Copy)", self.title),
            created_at: Utc::now(),
            status: QuizStatus::Draft,
            ..self.clone()
        }
    }

    /// Mark the quiz as published.
    pub fn publish(mut self) -> Self {
        self.status = QuizStatus::Published;
        self
    }
}
