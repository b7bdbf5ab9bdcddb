use serde::Serialize;

use super::{Role, Turn, GREETING, PERSONA};
use crate::domain::DomainError;

/// Ordered, append-only log of the turns in one session.
///
/// The first two turns are always the persona and the greeting. Turns are
/// never edited or removed; the transcript only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Number of turns every fresh transcript starts with.
    pub const SEED_LEN: usize = 2;

    pub fn initialize() -> Self {
        Self {
            turns: vec![Turn::system(PERSONA), Turn::assistant(GREETING)],
        }
    }

    pub fn append_user(&mut self, text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::invalid_input("user message is empty"));
        }
        self.turns.push(Turn::user(text));
        Ok(())
    }

    /// Append a reply. Only valid directly after a user turn, so the
    /// user/assistant alternation can never be broken from outside.
    pub fn append_assistant(&mut self, text: &str) -> Result<(), DomainError> {
        match self.last().map(Turn::role) {
            Some(Role::User) => {
                self.turns.push(Turn::assistant(text));
                Ok(())
            }
            _ => Err(DomainError::invalid_input(
                "assistant turn must follow a user turn",
            )),
        }
    }

    /// Turns to show on screen, in insertion order, without the persona.
    ///
    /// The iterator borrows the transcript and is cheap to clone; calling this
    /// again (or cloning the result) restarts from the first visible turn.
    pub fn visible_turns(&self) -> impl Iterator<Item = &Turn> + Clone + '_ {
        self.turns.iter().filter(|t| t.is_visible())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
