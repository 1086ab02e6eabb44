//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::store::QuizStore;
use crate::types::question::QuizSet;
use crate::types::result::QuizResult;

/// In-memory storage for quizzes and attempt records.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
pub struct MemoryStore {
    quizzes: RwLock<HashMap<String, QuizSet>>,
    results: RwLock<Vec<QuizResult>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
            results: RwLock::new(Vec::new()),
        }
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.quizzes.write().unwrap().clear();
        self.results.write().unwrap().clear();
    }

    /// Get the number of stored quizzes.
    pub fn quiz_count(&self) -> usize {
        self.quizzes.read().unwrap().len()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn get_quiz(&self, id: &str) -> Result<Option<QuizSet>> {
        Ok(self.quizzes.read().unwrap().get(id).cloned())
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSet>> {
        let mut quizzes: Vec<QuizSet> = self.quizzes.read().unwrap().values().cloned().collect();
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }

    async fn save_quiz(&self, quiz: &QuizSet) -> Result<()> {
        self.quizzes
            .write()
            .unwrap()
            .insert(quiz.id.clone(), quiz.clone());
        Ok(())
    }

    async fn delete_quiz(&self, id: &str) -> Result<()> {
        self.quizzes.write().unwrap().remove(id);
        Ok(())
    }

    async fn results_for_quiz(&self, quiz_id: &str) -> Result<Vec<QuizResult>> {
        Ok(self
            .results
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    async fn add_result(&self, result: &QuizResult) -> Result<()> {
        self.results.write().unwrap().push(result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::result::Score;
    use chrono::Utc;
    use uuid::Uuid;

    fn quiz(title: &str) -> QuizSet {
        QuizSet::new(title, "deck.pdf", vec![])
    }

    fn result(quiz_id: &str) -> QuizResult {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            taken_at: Utc::now(),
            duration_secs: 10,
            answers: vec![],
            score: Score {
                correct: 0,
                total: 0,
                percent: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_save_get_delete_roundtrip() {
        let store = MemoryStore::new();
        let quiz = quiz("Biology");

        store.save_quiz(&quiz).await.unwrap();
        let loaded = store.get_quiz(&quiz.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Biology");

        store.delete_quiz(&quiz.id).await.unwrap();
        assert!(store.get_quiz(&quiz.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let store = MemoryStore::new();
        let mut quiz = quiz("Draft title");
        store.save_quiz(&quiz).await.unwrap();

        quiz.title = "Final title".into();
        store.save_quiz(&quiz).await.unwrap();

        assert_eq!(store.quiz_count(), 1);
        let loaded = store.get_quiz(&quiz.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Final title");
    }

    #[tokio::test]
    async fn test_duplicate_and_publish_through_store() {
        let store = MemoryStore::new();
        let quiz = quiz("Biology");
        store.save_quiz(&quiz).await.unwrap();

        let copy = store.duplicate_quiz(&quiz.id).await.unwrap();
        assert_ne!(copy.id, quiz.id);
        assert_eq!(store.quiz_count(), 2);

        let published = store.publish_quiz(&copy.id).await.unwrap();
        assert_eq!(
            published.status,
            crate::types::question::QuizStatus::Published
        );
        let loaded = store.get_quiz(&copy.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, crate::types::question::QuizStatus::Published);

        let err = store.duplicate_quiz("missing").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::GenerateError::QuizNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_results_filtered_by_quiz() {
        let store = MemoryStore::new();
        let quiz_a = quiz("A");
        let quiz_b = quiz("B");

        store.add_result(&result(&quiz_a.id)).await.unwrap();
        store.add_result(&result(&quiz_a.id)).await.unwrap();
        store.add_result(&result(&quiz_b.id)).await.unwrap();

        assert_eq!(store.results_for_quiz(&quiz_a.id).await.unwrap().len(), 2);
        assert_eq!(store.results_for_quiz(&quiz_b.id).await.unwrap().len(), 1);
    }
}
