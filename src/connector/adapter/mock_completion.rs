use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::CompletionClient;
use crate::domain::{CompletionResult, Transcript};

/// Offline [`CompletionClient`] that plays back scripted results.
///
/// Results are returned in order; once the script runs out the last result is
/// repeated. Every call records the transcript length it was given so callers
/// can check that the full history was sent.
pub struct MockCompletion {
    script: Mutex<VecDeque<CompletionResult>>,
    fallback: CompletionResult,
    calls: AtomicUsize,
    seen_lengths: Mutex<Vec<usize>>,
}

impl MockCompletion {
    pub fn scripted(results: Vec<CompletionResult>) -> Self {
        let fallback = results
            .last()
            .cloned()
            .unwrap_or_else(|| CompletionResult::failure("mock script is empty"));
        Self {
            script: Mutex::new(results.into()),
            fallback,
            calls: AtomicUsize::new(0),
            seen_lengths: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::scripted(vec![CompletionResult::success(text)])
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::scripted(vec![CompletionResult::failure(reason)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_lengths(&self) -> Vec<usize> {
        self.seen_lengths
            .lock()
            .map(|lengths| lengths.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, transcript: &Transcript) -> CompletionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut lengths) = self.seen_lengths.lock() {
            lengths.push(transcript.len());
        }

        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn model_name(&self) -> &str {
        "mock-completion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plays_script_then_repeats_last() {
        let client = MockCompletion::scripted(vec![
            CompletionResult::failure("down"),
            CompletionResult::success("back up"),
        ]);
        let transcript = Transcript::initialize();

        assert_eq!(client.complete(&transcript).await, CompletionResult::failure("down"));
        assert_eq!(client.complete(&transcript).await, CompletionResult::success("back up"));
        assert_eq!(client.complete(&transcript).await, CompletionResult::success("back up"));
        assert_eq!(client.calls(), 3);
        assert_eq!(client.seen_lengths(), vec![2, 2, 2]);
    }

    #[tokio::test]
    async fn test_empty_script_fails() {
        let client = MockCompletion::scripted(vec![]);

        let result = client.complete(&Transcript::initialize()).await;

        assert!(!result.is_success());
    }
}
