//! Testing utilities including mock implementations.
//!
//! Useful for testing the pipeline without making real service calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{GenerateError, Result};
use crate::traits::ai::AI;
use crate::types::page::DocumentBlob;

/// One scripted mock outcome.
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Respond(String),
    Fail(String),
}

/// A mock generation service with scripted responses.
///
/// Outcomes are consumed in order; once the script is exhausted the
/// last outcome repeats, which makes "service always returns the same
/// thing" scenarios trivial to express. Every received prompt is
/// recorded for assertions.
#[derive(Default)]
pub struct MockAI {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    last: Mutex<Option<ScriptedOutcome>>,
    prompts: Mutex<Vec<String>>,
    documents_seen: Mutex<usize>,
}

impl MockAI {
    /// Create a mock with an empty script (every call fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn with_response(self, raw: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Respond(raw.into()));
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Fail(message.into()));
        self
    }

    /// All prompts the mock has received.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Number of calls that carried a raw document.
    pub fn documents_seen(&self) -> usize {
        *self.documents_seen.lock().unwrap()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn generate(&self, prompt: &str, document: Option<&DocumentBlob>) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if document.is_some() {
            *self.documents_seen.lock().unwrap() += 1;
        }

        let outcome = {
            let mut script = self.script.lock().unwrap();
            match script.pop_front() {
                Some(outcome) => {
                    *self.last.lock().unwrap() = Some(outcome.clone());
                    outcome
                }
                None => self
                    .last
                    .lock()
                    .unwrap()
                    .clone()
                    .unwrap_or_else(|| ScriptedOutcome::Fail("mock script is empty".into())),
            }
        };

        match outcome {
            ScriptedOutcome::Respond(raw) => Ok(raw),
            ScriptedOutcome::Fail(message) => Err(GenerateError::Service(message.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_script_then_repeats_last() {
        let mock = MockAI::new().with_response("first").with_response("second");

        assert_eq!(mock.generate("p1", None).await.unwrap(), "first");
        assert_eq!(mock.generate("p2", None).await.unwrap(), "second");
        assert_eq!(mock.generate("p3", None).await.unwrap(), "second");
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.prompts()[0], "p1");
    }

    #[tokio::test]
    async fn test_mock_empty_script_fails() {
        let mock = MockAI::new();
        assert!(mock.generate("p", None).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_counts_documents() {
        let mock = MockAI::new().with_response("ok");
        let blob = DocumentBlob::new(vec![1, 2, 3], "application/pdf");
        mock.generate("p", Some(&blob)).await.unwrap();
        mock.generate("p", None).await.unwrap();
        assert_eq!(mock.documents_seen(), 1);
    }
}
