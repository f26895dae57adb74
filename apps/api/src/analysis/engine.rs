//! Analysis engine. Every feature reaches the model the same way:
//! assemble a prompt, make a single generation call, parse the structured reply.
//!
//! The engine never retries. Retrying a failed generation is the caller's decision.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{LlmError, TextGenerator};

pub const DEFAULT_MAX_INPUT_CHARS: usize = 20_000;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Text generation failed: {0}")]
    ExternalService(#[source] LlmError),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Only generation failures may succeed on a plain retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalysisError::ExternalService(_))
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AnalysisError::MalformedResponse(reason.into())
    }
}

/// A prompt → single generation → structured parse unit of work.
pub trait StructuredTask: Send + Sync {
    type Output: Send;

    /// Short label used in logs.
    const NAME: &'static str;

    /// Deterministic: identical tasks always produce identical prompts.
    fn prompt(&self) -> String;

    fn parse(&self, response: &str) -> Result<Self::Output, AnalysisError>;
}

/// Runs structured tasks against an injected text generator.
#[derive(Clone)]
pub struct Analyzer {
    generator: Arc<dyn TextGenerator>,
    max_input_chars: usize,
}

impl Analyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub async fn run<T: StructuredTask>(&self, task: &T) -> Result<T::Output, AnalysisError> {
        let prompt = task.prompt();
        debug!("{} prompt assembled ({} chars)", T::NAME, prompt.len());

        let response = self
            .generator
            .generate_text(&prompt)
            .await
            .map_err(|e| {
                warn!("{} generation failed: {e}", T::NAME);
                AnalysisError::ExternalService(e)
            })?;
        debug!("{} response received ({} chars)", T::NAME, response.len());

        let output = task.parse(&response).map_err(|e| {
            warn!("{} response rejected: {e}", T::NAME);
            e
        })?;
        info!("{} completed", T::NAME);

        Ok(output)
    }

    /// Trims `text` and checks it is non-empty and within the size limit.
    pub fn validate_text<'a>(
        &self,
        field: &'static str,
        text: &'a str,
    ) -> Result<&'a str, AnalysisError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::InvalidInput {
                field,
                reason: "cannot be empty".to_string(),
            });
        }

        let chars = trimmed.chars().count();
        if chars > self.max_input_chars {
            return Err(AnalysisError::InvalidInput {
                field,
                reason: format!(
                    "exceeds maximum length of {} characters ({chars})",
                    self.max_input_chars
                ),
            });
        }

        Ok(trimmed)
    }
}
