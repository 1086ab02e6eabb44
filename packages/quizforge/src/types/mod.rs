//! Domain types for question generation, quizzes, and attempts.

pub mod page;
pub mod question;
pub mod request;
pub mod result;
