//! Evidence-Grounded Question Generation
//!
//! Turns a source document's extracted text into exam-style questions
//! that are verifiably grounded in that document, and rejects or
//! replaces anything that cannot be traced back to a cited page.
//!
//! # Design Philosophy
//!
//! The generation service is treated as an untrusted collaborator: it
//! can hallucinate, return malformed output, stall, or repeat itself.
//! The pipeline owns everything needed to still deliver a usable
//! result:
//!
//! - Bounded, retried service calls with exponential backoff
//! - Structural validation per question kind
//! - Fuzzy evidence verification against the cited pages
//! - Prompt-key deduplication across rounds
//! - Deterministic synthetic top-up instead of hard failure
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quizforge::{Generator, GenerationRequest, PageText};
//! use quizforge::testing::MockAI;
//!
//! let ai = Arc::new(MockAI::new().with_response(r#"[...]"#));
//! let generator = Generator::with_service(ai);
//!
//! let request = GenerationRequest::new("slides.pdf", 10)
//!     .with_pages([PageText::new(1, "Alpha beta gamma")]);
//! let questions = generator.generate(&request).await?;
//! assert_eq!(questions.len(), 10);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (AI, QuizStore)
//! - [`types`] - Domain types (pages, questions, requests, results)
//! - [`pipeline`] - Prompting, parsing, synthetic fallback, orchestrator
//! - [`fuzzy`] - Similarity scoring and fuzzy containment
//! - [`validate`] - Structural and evidence validation
//! - [`stores`] - Storage implementations (MemoryStore, JsonFileStore)
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod fuzzy;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validate;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use error::{GenerateError, Result};
pub use traits::{ai::AI, store::QuizStore};
pub use types::{
    page::{page_map, DocumentBlob, PageText},
    question::{
        Choice, Difficulty, Evidence, Question, QuestionKind, QuizSet, QuizStatus, SYNTHETIC_TAG,
    },
    request::{DifficultyMix, GenerationRequest, GeneratorConfig},
    result::{grade, AnswerRecord, QuizResult, Score, SubmittedAnswer},
};

// Re-export pipeline components
pub use pipeline::{
    compact_context, format_generate_prompt, parse_response, synthetic_questions, Generator,
};

// Re-export validators
pub use validate::{is_evidence_valid, is_structurally_valid, match_short_answer};

// Re-export fuzzy matching
pub use fuzzy::{fuzzy_contains, similarity};

// Re-export stores
pub use stores::{JsonFileStore, MemoryStore};

#[cfg(feature = "gemini")]
pub use ai::GeminiClient;
