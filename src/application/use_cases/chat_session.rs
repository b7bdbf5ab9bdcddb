use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::CompletionClient;
use crate::domain::{CompletionResult, DomainError, Transcript, Turn};

/// What became of one user submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The assistant answered and the reply was appended to the transcript.
    Replied(String),
    /// The completion failed; only the user turn was recorded.
    Failed { reason: String },
}

/// One interactive conversation. Owns its transcript exclusively; separate
/// sessions never share state.
pub struct ChatSession {
    id: Uuid,
    client: Arc<dyn CompletionClient>,
    transcript: Transcript,
}

impl ChatSession {
    pub fn start(client: Arc<dyn CompletionClient>) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, model = client.model_name(), "Session started");
        Self {
            id,
            client,
            transcript: Transcript::initialize(),
        }
    }

    pub async fn submit(&mut self, text: &str) -> Result<SubmitOutcome, DomainError> {
        self.transcript.append_user(text)?;
        debug!(
            session = %self.id,
            turns = self.transcript.len(),
            "Requesting completion"
        );

        match self.client.complete(&self.transcript).await {
            CompletionResult::Success { text } => {
                self.transcript.append_assistant(&text)?;
                Ok(SubmitOutcome::Replied(text))
            }
            CompletionResult::Failure { reason } => {
                warn!(session = %self.id, "Completion failed: {reason}");
                Ok(SubmitOutcome::Failed { reason })
            }
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn visible_turns(&self) -> impl Iterator<Item = &Turn> + Clone + '_ {
        self.transcript.visible_turns()
    }

    /// Close the session and hand back what was said.
    pub fn end(self) -> Transcript {
        info!(
            session = %self.id,
            turns = self.transcript.len(),
            "Session ended"
        );
        self.transcript
    }
}
