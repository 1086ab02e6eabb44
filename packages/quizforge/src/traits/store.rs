//! Storage trait for quiz sets and attempt records.
//!
//! The pipeline only needs a narrow read/write contract; how the data
//! is stored (memory, JSON files, a database) is up to the
//! implementation.

use async_trait::async_trait;

use crate::error::{GenerateError, Result};
use crate::types::question::QuizSet;
use crate::types::result::QuizResult;

/// Persistence contract for generated quiz sets and attempt records.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Get a quiz by identifier.
    async fn get_quiz(&self, id: &str) -> Result<Option<QuizSet>>;

    /// List all stored quizzes.
    async fn list_quizzes(&self) -> Result<Vec<QuizSet>>;

    /// Insert or replace a quiz.
    async fn save_quiz(&self, quiz: &QuizSet) -> Result<()>;

    /// Delete a quiz by identifier.
    async fn delete_quiz(&self, id: &str) -> Result<()>;

    /// List attempt records for a quiz.
    async fn results_for_quiz(&self, quiz_id: &str) -> Result<Vec<QuizResult>>;

    /// Append an attempt record.
    async fn add_result(&self, result: &QuizResult) -> Result<()>;

    /// Store a draft copy of an existing quiz and return it.
    async fn duplicate_quiz(&self, id: &str) -> Result<QuizSet> {
        let quiz = self
            .get_quiz(id)
            .await?
            .ok_or_else(|| GenerateError::QuizNotFound { id: id.to_string() })?;
        let copy = quiz.duplicate();
        self.save_quiz(&copy).await?;
        Ok(copy)
    }

    /// Mark a stored quiz as published and return it.
    async fn publish_quiz(&self, id: &str) -> Result<QuizSet> {
        let quiz = self
            .get_quiz(id)
            .await?
            .ok_or_else(|| GenerateError::QuizNotFound { id: id.to_string() })?;
        let published = quiz.publish();
        self.save_quiz(&published).await?;
        Ok(published)
    }
}
