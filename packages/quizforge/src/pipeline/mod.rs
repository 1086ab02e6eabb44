//! Generation pipeline: prompt building, response parsing, synthetic
//! fallback, and the orchestrator.

pub mod generate;
pub mod parse;
pub mod prompts;
pub mod synthetic;

pub use generate::Generator;
pub use parse::{parse_response, RawChoice, RawEvidence, RawQuestion};
pub use prompts::{compact_context, format_generate_prompt};
pub use synthetic::synthetic_questions;
