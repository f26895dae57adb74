// Skill-gap analysis: Benchmark (gap report), Elevate (learning path), Ace (interview questions).
// Every feature goes through `engine::Analyzer`: one prompt, one generation call, one strict parse.

pub mod engine;
pub mod gap;
pub mod handlers;
pub mod interview;
pub mod learning_path;
pub mod models;
pub mod prompts;
pub mod response;

pub use engine::{AnalysisError, Analyzer};
