//! Response parsing - normalize raw service output into questions.
//!
//! The generation service is untrusted: responses may be wrapped in
//! markdown code fences or surrounding prose, use an object wrapper
//! instead of a bare array, or omit fields entirely. Parsing is
//! strictly non-fatal: anything unparseable yields zero questions and
//! the orchestrator treats the round as empty.
//!
//! Parsing is kept separate from validation so that parse failures and
//! validation discards stay distinguishable.

use indexmap::IndexSet;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::types::question::{Choice, Difficulty, Evidence, Question, QuestionKind};

/// A question entry as the service returned it, before default rules.
///
/// Every field tolerates absence or a wrong JSON type; the strict shape
/// is only established by [`RawQuestion::into_question`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: Value,
    #[serde(alias = "type")]
    pub kind: Value,
    pub difficulty: Value,
    pub prompt: Value,
    #[serde(alias = "options")]
    pub choices: Value,
    #[serde(alias = "shortAnswerAccepted")]
    pub accepted_answers: Value,
    pub explanation: Value,
    pub evidence: RawEvidence,
    pub topic_tags: Value,
}

/// Raw choice entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawChoice {
    pub id: Value,
    pub text: Value,
    pub is_correct: Value,
}

/// Raw evidence entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEvidence {
    pub page_numbers: Value,
    pub snippets: Value,
}

impl RawQuestion {
    /// Apply the default rules and produce a domain question.
    ///
    /// Rules, per field:
    /// - `id`: missing or blank -> fresh UUID
    /// - `kind`: unknown or missing -> single-select
    /// - `difficulty`: unknown or missing -> easy
    /// - string fields: numbers and booleans coerced, everything else -> ""
    /// - `pageNumbers`: numerics truncated to integers, non-positive dropped
    /// - absent arrays -> empty sequences
    pub fn into_question(self) -> Question {
        let id = match lossy_string(&self.id) {
            s if s.is_empty() => Uuid::new_v4().to_string(),
            s => s,
        };

        let choices = self
            .choices
            .as_array()
            .map(|entries| entries.iter().filter_map(to_choice).collect())
            .unwrap_or_default();

        Question {
            id,
            kind: QuestionKind::parse_lenient(&lossy_string(&self.kind)),
            difficulty: Difficulty::parse_lenient(&lossy_string(&self.difficulty)),
            prompt: lossy_string(&self.prompt),
            choices,
            accepted_answers: lossy_strings(&self.accepted_answers),
            explanation: self.explanation.as_str().map(String::from),
            evidence: Evidence {
                page_numbers: page_numbers(&self.evidence.page_numbers),
                snippets: lossy_strings(&self.evidence.snippets),
            },
            topic_tags: lossy_strings(&self.topic_tags),
        }
    }
}

/// Parse a raw service response into questions.
///
/// Entries whose normalized prompt is already in `exclusions` are
/// dropped before validation. Malformed payloads yield an empty vec.
pub fn parse_response(raw: &str, exclusions: &IndexSet<String>) -> Vec<Question> {
    let Some(payload) = normalize_json_array(raw) else {
        return vec![];
    };
    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(&payload) else {
        return vec![];
    };

    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawQuestion>(entry).ok())
        .map(RawQuestion::into_question)
        .filter(|q| !exclusions.contains(&q.prompt_key()))
        .collect()
}

/// Strip code fences and extract the outermost `[...]` span.
///
/// Object wrappers like `{"questions": [...]}` are handled here too:
/// the span extraction keeps only the inner array. Returns None when no
/// array boundary exists anywhere in the text.
fn normalize_json_array(raw: &str) -> Option<String> {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    let first = text.find('[')?;
    let last = text.rfind(']')?;
    if first >= last {
        return None;
    }
    Some(text[first..=last].to_string())
}

fn to_choice(entry: &Value) -> Option<Choice> {
    match entry {
        // Bare string entries are treated as incorrect choices
        Value::String(text) => Some(Choice {
            id: Uuid::new_v4().to_string(),
            text: text.clone(),
            is_correct: false,
        }),
        Value::Object(_) => {
            let raw: RawChoice = serde_json::from_value(entry.clone()).ok()?;
            let id = match lossy_string(&raw.id) {
                s if s.is_empty() => Uuid::new_v4().to_string(),
                s => s,
            };
            Some(Choice {
                id,
                text: lossy_string(&raw.text),
                is_correct: raw.is_correct.as_bool().unwrap_or(false),
            })
        }
        _ => None,
    }
}

/// Coerce a JSON scalar to a string; non-scalars become "".
fn lossy_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerce an array of scalars to strings, dropping empties.
fn lossy_strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(lossy_string)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Truncate numeric entries to positive integer page numbers.
fn page_numbers(value: &Value) -> Vec<u32> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_f64)
                .map(|n| n.trunc())
                .filter(|n| *n >= 1.0 && *n <= u32::MAX as f64)
                .map(|n| n as u32)
                .collect()
        })
        .unwrap_or_default()
}
