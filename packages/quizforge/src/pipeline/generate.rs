//! Generation orchestrator.
//!
//! Drives the unreliable generation service to a target quantity of
//! valid, non-duplicate, evidence-backed questions: bounded retried
//! calls, accumulation across rounds, and a deterministic synthetic
//! top-up so the caller receives exactly the requested count whenever
//! the source text allows it.

use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{GenerateError, Result};
use crate::pipeline::parse::parse_response;
use crate::pipeline::prompts::{compact_context, format_generate_prompt};
use crate::pipeline::synthetic::synthetic_questions;
use crate::traits::ai::AI;
use crate::types::page::{page_map, DocumentBlob};
use crate::types::question::Question;
use crate::types::request::{GenerationRequest, GeneratorConfig};
use crate::validate::{is_evidence_valid, is_structurally_valid};

/// The top-level generation control loop.
///
/// Holds no cross-request state: all accumulation (the question list
/// and the dedup key set) is local to one [`Generator::generate`] call.
pub struct Generator {
    ai: Option<Arc<dyn AI>>,
    config: GeneratorConfig,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("service", &self.ai.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl Generator {
    /// Create a generator.
    ///
    /// Fails with [`GenerateError::NotConfigured`] when no service is
    /// supplied and synthetic-only mode is not enabled; this is the one
    /// fatal error of the pipeline and it surfaces before any round.
    /// In synthetic-only mode a supplied service is dropped so no
    /// round ever calls it.
    pub fn new(ai: Option<Arc<dyn AI>>, config: GeneratorConfig) -> Result<Self> {
        if ai.is_none() && !config.synthetic_only {
            return Err(GenerateError::NotConfigured);
        }
        let ai = if config.synthetic_only { None } else { ai };
        Ok(Self { ai, config })
    }

    /// Convenience constructor for a service-backed generator.
    pub fn with_service(ai: Arc<dyn AI>) -> Self {
        Self {
            ai: Some(ai),
            config: GeneratorConfig::default(),
        }
    }

    /// Generate questions for a request.
    ///
    /// Returns exactly `desired_count` questions unless the source
    /// material is exhausted, in which case it returns what a
    /// best-effort process could assemble. Never errors for "not
    /// enough unique content".
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>> {
        let pages = page_map(&request.page_texts);
        let check_evidence = !request.page_texts.is_empty();
        let context = compact_context(&request.page_texts);

        let mut accumulated: Vec<Question> = Vec::with_capacity(request.desired_count);
        let mut seen_keys: IndexSet<String> = IndexSet::new();

        if let Some(ai) = &self.ai {
            for round in 0..self.config.max_rounds {
                if accumulated.len() >= request.desired_count {
                    break;
                }
                let remaining = request.desired_count - accumulated.len();
                let exclusions: Vec<&str> = seen_keys
                    .iter()
                    .take(self.config.exclusion_limit)
                    .map(String::as_str)
                    .collect();
                let prompt = format_generate_prompt(request, remaining, &context, &exclusions);

                let raw = match self
                    .call_with_backoff(ai.as_ref(), &prompt, request.document.as_ref())
                    .await
                {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(round, error = %e, "generation round failed, continuing");
                        continue;
                    }
                };

                let candidates = parse_response(&raw, &seen_keys);
                debug!(round, candidates = candidates.len(), "parsed round response");

                for question in candidates {
                    if !is_structurally_valid(&question) {
                        debug!(id = %question.id, "discarding structurally invalid question");
                        continue;
                    }
                    if check_evidence && !is_evidence_valid(&pages, &question) {
                        debug!(id = %question.id, "discarding question with unverifiable evidence");
                        continue;
                    }
                    if !seen_keys.insert(question.prompt_key()) {
                        continue;
                    }
                    accumulated.push(question);
                    if accumulated.len() >= request.desired_count {
                        break;
                    }
                }
            }
        }

        // Top up any shortfall with deterministic synthetic questions.
        // Over-request by the accumulated count: each accumulated prompt
        // can collide with at most one fabricated candidate.
        if accumulated.len() < request.desired_count {
            let needed = request.desired_count - accumulated.len();
            let synthetic = synthetic_questions(request, needed + accumulated.len());
            info!(
                needed,
                fabricated = synthetic.len(),
                "topping up with synthetic questions"
            );
            for question in synthetic {
                if !seen_keys.insert(question.prompt_key()) {
                    continue;
                }
                accumulated.push(question);
                if accumulated.len() >= request.desired_count {
                    break;
                }
            }
        }

        accumulated.truncate(request.desired_count);
        info!(
            count = accumulated.len(),
            desired = request.desired_count,
            "generation finished"
        );
        Ok(accumulated)
    }

    /// Call the service with bounded retries and exponential backoff.
    async fn call_with_backoff(
        &self,
        ai: &dyn AI,
        prompt: &str,
        document: Option<&DocumentBlob>,
    ) -> Result<String> {
        let mut last_err = GenerateError::service(std::io::Error::other("no attempts made"));
        for attempt in 0..self.config.max_attempts {
            match ai.generate(prompt, document).await {
                Ok(raw) => return Ok(raw),
                Err(e) => {
                    warn!(attempt, error = %e, "generation call failed");
                    last_err = e;
                    let delay = self.config.backoff_base * 2u32.saturating_pow(attempt as u32);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
        Err(last_err)
    }
}
