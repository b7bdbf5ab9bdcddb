//! Conversation-level behaviour of a chat session driven by a scripted client.

use std::sync::Arc;

use stressless::{
    ChatSession, CompletionResult, MockCompletion, Role, SubmitOutcome, Transcript, Turn,
    GREETING, PERSONA,
};

fn roles(transcript: &Transcript) -> Vec<Role> {
    transcript.turns().iter().map(Turn::role).collect()
}

#[tokio::test]
async fn test_fresh_session_has_seed_pair() {
    let session = ChatSession::start(Arc::new(MockCompletion::replying("unused")));
    let turns = session.transcript().turns();

    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0], Turn::system(PERSONA));
    assert_eq!(turns[1], Turn::assistant(GREETING));
}

#[tokio::test]
async fn test_successful_reply_is_appended() {
    let client = Arc::new(MockCompletion::replying("Take a deep breath..."));
    let mut session = ChatSession::start(client.clone());

    let outcome = session.submit("I'm stressed about exams").await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Replied("Take a deep breath...".to_string()));
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript.turns()[2], Turn::user("I'm stressed about exams"));
    assert_eq!(transcript.last(), Some(&Turn::assistant("Take a deep breath...")));
}

#[tokio::test]
async fn test_failed_reply_records_only_user_turn() {
    let client = Arc::new(MockCompletion::failing("network timeout"));
    let mut session = ChatSession::start(client.clone());

    let outcome = session.submit("hello").await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            reason: "network timeout".to_string()
        }
    );
    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.transcript().last(), Some(&Turn::user("hello")));
}

#[tokio::test]
async fn test_successful_rounds_alternate_and_grow_by_two() {
    let client = Arc::new(MockCompletion::scripted(vec![
        CompletionResult::success("one"),
        CompletionResult::success("two"),
        CompletionResult::success("three"),
    ]));
    let mut session = ChatSession::start(client.clone());

    for (round, text) in ["a", "b", "c"].into_iter().enumerate() {
        session.submit(text).await.unwrap();
        assert_eq!(session.transcript().len(), 2 + 2 * (round + 1));
    }

    assert_eq!(
        roles(session.transcript())[2..],
        [
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
    assert_eq!(client.seen_lengths(), vec![3, 5, 7]);
}

#[tokio::test]
async fn test_failure_then_recovery_keeps_seed_pair() {
    let client = Arc::new(MockCompletion::scripted(vec![
        CompletionResult::failure("503"),
        CompletionResult::success("I'm here now."),
    ]));
    let mut session = ChatSession::start(client.clone());

    session.submit("anyone there?").await.unwrap();
    session.submit("hello?").await.unwrap();

    let transcript = session.end();
    assert_eq!(transcript.turns()[0], Turn::system(PERSONA));
    assert_eq!(transcript.turns()[1], Turn::assistant(GREETING));
    assert_eq!(
        roles(&transcript)[2..],
        [Role::User, Role::User, Role::Assistant]
    );
    // The failed round contributes no marker to the context of the next one.
    assert_eq!(client.seen_lengths(), vec![3, 4]);
}

#[tokio::test]
async fn test_visible_turns_never_include_system() {
    let client = Arc::new(MockCompletion::scripted(vec![
        CompletionResult::success("ok"),
        CompletionResult::failure("down"),
    ]));
    let mut session = ChatSession::start(client);

    assert!(session.visible_turns().all(|t| t.role() != Role::System));
    session.submit("first").await.unwrap();
    assert!(session.visible_turns().all(|t| t.role() != Role::System));
    session.submit("second").await.unwrap();

    let once: Vec<Turn> = session.visible_turns().cloned().collect();
    let twice: Vec<Turn> = session.visible_turns().cloned().collect();
    assert_eq!(once, twice);
    assert_eq!(once.len(), session.transcript().len() - 1);
}
