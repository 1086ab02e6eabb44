//! Core trait abstractions (AI, QuizStore).

pub mod ai;
pub mod store;
