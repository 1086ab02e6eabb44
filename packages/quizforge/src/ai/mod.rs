//! Reference AI implementations.

mod gemini;

pub use gemini::GeminiClient;
