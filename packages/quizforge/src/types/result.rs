//! Quiz attempt records and grading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::question::{QuestionKind, QuizSet};
use crate::validate::match_short_answer;

/// A caller-submitted answer to one question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    /// Identifier of the question being answered
    pub question_id: String,

    /// Selected choice ids (select kinds)
    #[serde(default)]
    pub selected_choice_ids: Vec<String>,

    /// Free-text answer (free-text kind)
    #[serde(default)]
    pub free_text: Option<String>,
}

/// One graded answer within a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    #[serde(default)]
    pub selected_choice_ids: Vec<String>,
    #[serde(default)]
    pub free_text: Option<String>,
    pub is_correct: bool,
}

/// Aggregate score for an attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    /// Rounded percentage; 0 for an empty quiz
    pub percent: u32,
}

/// A stored record of one quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// Opaque unique identifier
    pub id: String,

    /// Quiz this attempt belongs to
    pub quiz_id: String,

    /// When the attempt was submitted
    pub taken_at: DateTime<Utc>,

    /// Attempt duration in seconds
    pub duration_secs: u64,

    /// Per-question graded answers
    pub answers: Vec<AnswerRecord>,

    /// Aggregate score
    pub score: Score,
}

/// Grade submitted answers against a quiz.
///
/// Select kinds are correct when the selected choice-id set equals the
/// correct choice-id set exactly. Free-text answers are matched against
/// the accepted strings with punctuation/whitespace normalization and a
/// fuzzy tolerance. Unanswered questions grade as incorrect.
pub fn grade(quiz: &QuizSet, answers: &[SubmittedAnswer], duration_secs: u64) -> QuizResult {
    let records: Vec<AnswerRecord> = quiz
        .questions
        .iter()
        .map(|question| {
            let submitted = answers.iter().find(|a| a.question_id == question.id);
            let is_correct = submitted.is_some_and(|answer| match question.kind {
                QuestionKind::FreeText => answer
                    .free_text
                    .as_deref()
                    .is_some_and(|text| match_short_answer(&question.accepted_answers, text)),
                QuestionKind::SingleSelect | QuestionKind::MultiSelect => {
                    let selected: HashSet<&str> =
                        answer.selected_choice_ids.iter().map(String::as_str).collect();
                    let correct: HashSet<&str> = question
                        .choices
                        .iter()
                        .filter(|c| c.is_correct)
                        .map(|c| c.id.as_str())
                        .collect();
                    !correct.is_empty() && selected == correct
                }
            });
            AnswerRecord {
                question_id: question.id.clone(),
                selected_choice_ids: submitted
                    .map(|a| a.selected_choice_ids.clone())
                    .unwrap_or_default(),
                free_text: submitted.and_then(|a| a.free_text.clone()),
                is_correct,
            }
        })
        .collect();

    let correct = records.iter().filter(|r| r.is_correct).count();
    let total = quiz.questions.len();
    let percent = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    };

    QuizResult {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz.id.clone(),
        taken_at: Utc::now(),
        duration_secs,
        answers: records,
        score: Score {
            correct,
            total,
            percent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::question::{Choice, Difficulty, Evidence, Question};

    fn select_question(id: &str, kind: QuestionKind, correct_texts: &[&str], wrong: &[&str]) -> Question {
        let mut choices: Vec<Choice> = correct_texts.iter().map(|t| Choice::new(*t, true)).collect();
        choices.extend(wrong.iter().map(|t| Choice::new(*t, false)));
        Question {
            id: id.into(),
            kind,
            difficulty: Difficulty::Easy,
            prompt: format!("prompt {id}"),
            choices,
            accepted_answers: vec![],
            explanation: None,
            evidence: Evidence::new([1], ["alpha"]),
            topic_tags: vec![],
        }
    }

    #[test]
    fn test_grade_single_select() {
        let question = select_question("q1", QuestionKind::SingleSelect, &["alpha"], &["zeta"]);
        let correct_id = question.choices[0].id.clone();
        let quiz = QuizSet::new("t", "s.pdf", vec![question]);

        let result = grade(
            &quiz,
            &[SubmittedAnswer {
                question_id: "q1".into(),
                selected_choice_ids: vec![correct_id],
                free_text: None,
            }],
            30,
        );
        assert_eq!(result.score.correct, 1);
        assert_eq!(result.score.percent, 100);
    }

    #[test]
    fn test_grade_multi_select_requires_exact_set() {
        let question = select_question("q1", QuestionKind::MultiSelect, &["a", "b"], &["c"]);
        let one_correct = question.choices[0].id.clone();
        let quiz = QuizSet::new("t", "s.pdf", vec![question]);

        let result = grade(
            &quiz,
            &[SubmittedAnswer {
                question_id: "q1".into(),
                selected_choice_ids: vec![one_correct],
                free_text: None,
            }],
            30,
        );
        assert_eq!(result.score.correct, 0);
    }

    #[test]
    fn test_grade_free_text_normalizes() {
        let question = Question {
            id: "q1".into(),
            kind: QuestionKind::FreeText,
            difficulty: Difficulty::Easy,
            prompt: "Define it".into(),
            choices: vec![],
            accepted_answers: vec!["machine learning".into()],
            explanation: None,
            evidence: Evidence::new([1], ["machine learning"]),
            topic_tags: vec![],
        };
        let quiz = QuizSet::new("t", "s.pdf", vec![question]);

        let result = grade(
            &quiz,
            &[SubmittedAnswer {
                question_id: "q1".into(),
                selected_choice_ids: vec![],
                free_text: Some("Machine  learning!!".into()),
            }],
            10,
        );
        assert_eq!(result.score.correct, 1);
    }

    #[test]
    fn test_grade_unanswered_is_incorrect() {
        let question = select_question("q1", QuestionKind::SingleSelect, &["alpha"], &["zeta"]);
        let quiz = QuizSet::new("t", "s.pdf", vec![question]);
        let result = grade(&quiz, &[], 5);
        assert_eq!(result.score.correct, 0);
        assert_eq!(result.score.total, 1);
        assert_eq!(result.score.percent, 0);
        assert!(!result.answers[0].is_correct);
    }
}
