use async_trait::async_trait;

use crate::domain::{CompletionResult, Transcript};

/// Sends a whole conversation to a chat-completion provider and returns the
/// reply.
///
/// Implementors own transport, serialization and vendor-specific details, and
/// must turn every failure into [`CompletionResult::Failure`] rather than
/// returning an error or panicking.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, transcript: &Transcript) -> CompletionResult;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
