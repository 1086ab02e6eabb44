//! AI trait for the text-generation service.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::page::DocumentBlob;

/// Capability trait for the external text-generation service.
///
/// Implementations wrap specific LLM providers and are treated as
/// untrusted: the returned text may be malformed, wrapped in prose or
/// code fences, or missing entirely. All retry, backoff, parsing, and
/// validation logic lives in the orchestrator, so mock and synthetic
/// implementations satisfy the same interface for testing.
#[async_trait]
pub trait AI: Send + Sync {
    /// Generate raw text from an instruction payload.
    ///
    /// When `document` is present the raw source document travels with
    /// the prompt (the pipeline had no extracted page text to inline).
    /// The response is expected to contain a JSON-shaped array of
    /// questions but callers must not rely on that.
    async fn generate(&self, prompt: &str, document: Option<&DocumentBlob>) -> Result<String>;
}
