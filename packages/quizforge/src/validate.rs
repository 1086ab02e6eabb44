//! Structural and evidence validation for generated questions.
//!
//! Both validators are pure predicates: invalid questions simply fail
//! the predicate and are dropped by the orchestrator, never raised as
//! errors.

use std::collections::HashMap;

use crate::fuzzy::fuzzy_contains;
use crate::types::question::{Question, QuestionKind};

/// Similarity threshold an evidence snippet must reach on a cited page.
pub const EVIDENCE_THRESHOLD: f64 = 0.9;

/// Similarity threshold for fuzzy short-answer acceptance.
const SHORT_ANSWER_THRESHOLD: f64 = 0.95;

/// Check that a question's shape matches the rules for its kind.
///
/// - single-select: >= 2 choices, exactly 1 marked correct
/// - multi-select: >= 3 choices, >= 2 marked correct
/// - free-text: >= 1 accepted answer
///
/// A prompt shorter than 3 chars fails every kind.
pub fn is_structurally_valid(question: &Question) -> bool {
    if question.prompt.trim().chars().count() < 3 {
        return false;
    }
    match question.kind {
        QuestionKind::SingleSelect => {
            let correct = question.choices.iter().filter(|c| c.is_correct).count();
            question.choices.len() >= 2 && correct == 1
        }
        QuestionKind::MultiSelect => {
            let correct = question.choices.iter().filter(|c| c.is_correct).count();
            question.choices.len() >= 3 && correct >= 2
        }
        QuestionKind::FreeText => !question.accepted_answers.is_empty(),
    }
}

/// Check that every cited snippet is fuzzy-found on at least one cited page.
///
/// Fails when the citation list or snippet list is empty, or when any
/// snippet has no match on any cited page. Callers that have no page
/// text at all skip this check entirely rather than calling it.
pub fn is_evidence_valid(page_text_by_number: &HashMap<u32, &str>, question: &Question) -> bool {
    let pages = &question.evidence.page_numbers;
    let snippets = &question.evidence.snippets;
    if pages.is_empty() || snippets.is_empty() {
        return false;
    }
    snippets.iter().all(|snippet| {
        pages.iter().any(|page| {
            page_text_by_number
                .get(page)
                .is_some_and(|text| fuzzy_contains(text, snippet, EVIDENCE_THRESHOLD))
        })
    })
}

/// Match a free-text answer against the accepted strings.
///
/// Both sides are normalized (lower-cased, punctuation stripped,
/// whitespace collapsed) before an exact or fuzzy comparison.
pub fn match_short_answer(accepted: &[String], user_text: &str) -> bool {
    if accepted.is_empty() {
        return false;
    }
    let text = normalize_answer(user_text);
    if text.is_empty() {
        return false;
    }
    accepted.iter().any(|a| {
        let a = normalize_answer(a);
        a == text || fuzzy_contains(&text, &a, SHORT_ANSWER_THRESHOLD)
    })
}

/// Lower-case, replace non-alphanumerics with spaces, collapse whitespace.
fn normalize_answer(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
