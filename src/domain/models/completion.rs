use serde::Serialize;

use super::{Transcript, Turn};
use crate::domain::DomainError;

pub const DEFAULT_MODEL: &str = "mistral-small-latest";
const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

/// Fixed sampling settings sent with every completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn top_p(&self) -> f32 {
        self.top_p
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

/// Request body for a chat completion: the whole transcript, system turn
/// included, plus the generation parameters.
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(transcript: &'a Transcript, params: &'a GenerationParams) -> Self {
        Self {
            model: params.model(),
            messages: transcript.turns(),
            max_tokens: params.max_tokens(),
            temperature: params.temperature(),
            top_p: params.top_p(),
        }
    }

    pub fn messages(&self) -> &[Turn] {
        self.messages
    }
}

/// Outcome of one completion exchange. Failures carry a readable reason and
/// are values, not errors: the caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Success { text: String },
    Failure { reason: String },
}

impl CompletionResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<String, DomainError>> for CompletionResult {
    fn from(result: Result<String, DomainError>) -> Self {
        match result {
            Ok(text) => Self::Success { text },
            Err(e) => Self::Failure {
                reason: e.to_string(),
            },
        }
    }
}
