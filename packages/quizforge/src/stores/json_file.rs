//! JSON-file-backed storage.
//!
//! Quizzes and attempt records live in two pretty-printed JSON files
//! under a data directory. Suitable for single-process deployments;
//! writes rewrite the whole file.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GenerateError, Result};
use crate::traits::store::QuizStore;
use crate::types::question::QuizSet;
use crate::types::result::QuizResult;

/// File-backed quiz store.
pub struct JsonFileStore {
    quizzes_path: PathBuf,
    results_path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct QuizFile {
    #[serde(default)]
    quizzes: Vec<QuizSet>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ResultFile {
    #[serde(default)]
    results: Vec<QuizResult>,
}

impl JsonFileStore {
    /// Create a store rooted at `data_dir` (created on first write).
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            quizzes_path: dir.join("quizzes.json"),
            results_path: dir.join("results.json"),
        }
    }

    async fn read_file<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(GenerateError::storage(e)),
        }
    }

    async fn write_file<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(GenerateError::storage)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        tokio::fs::write(path, content)
            .await
            .map_err(GenerateError::storage)
    }
}

#[async_trait]
impl QuizStore for JsonFileStore {
    async fn get_quiz(&self, id: &str) -> Result<Option<QuizSet>> {
        let file: QuizFile = self.read_file(&self.quizzes_path).await?;
        Ok(file.quizzes.into_iter().find(|q| q.id == id))
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSet>> {
        let file: QuizFile = self.read_file(&self.quizzes_path).await?;
        Ok(file.quizzes)
    }

    async fn save_quiz(&self, quiz: &QuizSet) -> Result<()> {
        let mut file: QuizFile = self.read_file(&self.quizzes_path).await?;
        match file.quizzes.iter_mut().find(|q| q.id == quiz.id) {
            Some(existing) => *existing = quiz.clone(),
            None => file.quizzes.push(quiz.clone()),
        }
        self.write_file(&self.quizzes_path, &file).await
    }

    async fn delete_quiz(&self, id: &str) -> Result<()> {
        let mut file: QuizFile = self.read_file(&self.quizzes_path).await?;
        file.quizzes.retain(|q| q.id != id);
        self.write_file(&self.quizzes_path, &file).await
    }

    async fn results_for_quiz(&self, quiz_id: &str) -> Result<Vec<QuizResult>> {
        let file: ResultFile = self.read_file(&self.results_path).await?;
        Ok(file
            .results
            .into_iter()
            .filter(|r| r.quiz_id == quiz_id)
            .collect())
    }

    async fn add_result(&self, result: &QuizResult) -> Result<()> {
        let mut file: ResultFile = self.read_file(&self.results_path).await?;
        file.results.push(result.clone());
        self.write_file(&self.results_path, &file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> JsonFileStore {
        let dir = std::env::temp_dir()
            .join("quizforge-tests")
            .join(format!("{}-{}", name, uuid::Uuid::new_v4()));
        JsonFileStore::new(dir)
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = temp_store("empty");
        assert!(store.list_quizzes().await.unwrap().is_empty());
        assert!(store.results_for_quiz("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_get_delete_roundtrip() {
        let store = temp_store("roundtrip");
        let quiz = QuizSet::new("Chemistry", "chem.pdf", vec![]);

        store.save_quiz(&quiz).await.unwrap();
        let loaded = store.get_quiz(&quiz.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Chemistry");
        assert_eq!(store.list_quizzes().await.unwrap().len(), 1);

        store.delete_quiz(&quiz.id).await.unwrap();
        assert!(store.get_quiz(&quiz.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_by_id() {
        let store = temp_store("replace");
        let mut quiz = QuizSet::new("Draft", "d.pdf", vec![]);
        store.save_quiz(&quiz).await.unwrap();
        quiz.title = "Renamed".into();
        store.save_quiz(&quiz).await.unwrap();

        let all = store.list_quizzes().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Renamed");
    }
}
