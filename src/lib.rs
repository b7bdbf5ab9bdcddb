pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ChatSession, CompletionClient, SubmitOutcome};

pub use connector::{MistralClient, MistralSettings, MockCompletion};

pub use domain::{
    CompletionRequest, CompletionResult, DomainError, GenerationParams, Role, Transcript, Turn,
    FALLBACK_MESSAGE, GREETING, PERSONA,
};
