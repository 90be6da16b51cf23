//! ChatSession - owns the message log and drives the send/hydrate/clear flows
//!
//! Exactly one session exists per running client. The log is append-only
//! (whole-log clear aside) and every mutation goes through `&mut` methods,
//! so the single-threaded front end needs no locking around it.

use log::{debug, warn};

use rag_client::{BackendTransport, Result};
use rag_core::Message;

use crate::machine::{SessionEvent, SessionState, StateMachine};

/// Agent message seeded into a cold-started log, before any history loads.
pub const GREETING: &str =
    "Hello! I am your Vector RAG Agent. Ask me anything about your knowledge base.";

/// Synthetic agent message appended when a chat round trip fails.
pub const SEND_FAILURE_NOTICE: &str = "Error connecting to server.";

/// How a call to [`ChatSession::send`] resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The server replied and its message was appended.
    Replied,
    /// The round trip failed; the synthetic failure notice was appended.
    Failed,
    /// Nothing was sent: empty input, or a round trip already in flight.
    Skipped,
}

/// The session state machine's driver.
///
/// Seeds the greeting at construction; [`hydrate`](Self::hydrate) replaces
/// it wholesale when the server holds a prior conversation. The front end
/// must let `hydrate` resolve before offering the first send so a late
/// history load cannot clobber an optimistic user message.
pub struct ChatSession<T: BackendTransport> {
    transport: T,
    messages: Vec<Message>,
    machine: StateMachine,
}

impl<T: BackendTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            messages: vec![Message::agent(GREETING)],
            machine: StateMachine::new(),
        }
    }

    /// The ordered message log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a chat round trip is outstanding. Gates new sends.
    pub fn in_flight(&self) -> bool {
        self.machine.state().is_sending()
    }

    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    /// Populate the log from server-persisted history. Invoked once at
    /// startup. A non-empty result replaces the whole log, greeting
    /// included; an empty result or a failure leaves the seeded greeting
    /// untouched. Failures are logged, never surfaced: the conversation
    /// stays usable without history.
    pub async fn hydrate(&mut self) {
        match self.transport.fetch_history().await {
            Ok(history) if history.is_empty() => {
                debug!("no persisted history; keeping the greeting");
            }
            Ok(history) => {
                let count = history.len();
                self.messages = history;
                self.machine
                    .handle_event(SessionEvent::HistoryHydrated { count });
                debug!("hydrated {count} messages from server history");
            }
            Err(err) => {
                warn!("failed to load history, continuing with the greeting: {err}");
            }
        }
    }

    /// Send one chat turn.
    ///
    /// The user message is appended optimistically before the round trip
    /// and is never removed, so the log always reflects exactly what was
    /// attempted. The backend receives the pre-send snapshot of the log as
    /// conversational context. A failed round trip appends
    /// [`SEND_FAILURE_NOTICE`] instead of a reply; there is no automatic
    /// retry.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Skipped;
        }
        if self.in_flight() {
            warn!("send ignored: a round trip is already in flight");
            return SendOutcome::Skipped;
        }

        let history = self.messages.clone();
        self.messages.push(Message::user(text));
        self.machine.handle_event(SessionEvent::SendStarted);

        match self.transport.send_chat(text, &history).await {
            Ok(reply) => {
                self.messages.push(Message::agent(reply));
                self.machine.handle_event(SessionEvent::ReplyReceived);
                SendOutcome::Replied
            }
            Err(err) => {
                warn!("chat round trip failed: {err}");
                self.messages.push(Message::agent(SEND_FAILURE_NOTICE));
                self.machine.handle_event(SessionEvent::SendFailed {
                    error: err.to_string(),
                });
                SendOutcome::Failed
            }
        }
    }

    /// Delete the server-persisted history, then clear the local log.
    ///
    /// On failure the local log is left bit-for-bit unchanged and the error
    /// is returned: clearing is a deliberate destructive action and must
    /// not silently appear to succeed.
    pub async fn clear_history(&mut self) -> Result<()> {
        self.transport.clear_history().await?;
        self.messages.clear();
        self.machine.handle_event(SessionEvent::HistoryCleared);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use mockall::mock;

    use rag_client::error::StatusCode;
    use rag_client::{ClientError, FilePayload, IngestDocument, SearchHit};
    use rag_core::Role;

    mock! {
        Backend {}

        #[async_trait]
        impl BackendTransport for Backend {
            async fn send_chat(&self, message: &str, history: &[Message]) -> rag_client::Result<String>;
            async fn ingest_documents(&self, documents: &[IngestDocument]) -> rag_client::Result<String>;
            async fn upload_file(&self, file: FilePayload) -> rag_client::Result<String>;
            async fn search(&self, query: &str) -> rag_client::Result<Vec<SearchHit>>;
            async fn fetch_history(&self) -> rag_client::Result<Vec<Message>>;
            async fn clear_history(&self) -> rag_client::Result<()>;
        }
    }

    fn status_error() -> ClientError {
        ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_success_appends_user_then_agent() {
        let mut backend = MockBackend::new();
        backend
            .expect_send_chat()
            .withf(|message, history| {
                // The history payload is the pre-send snapshot: just the greeting.
                message == "What is X?" && history == [Message::agent(GREETING)]
            })
            .returning(|_, _| Ok("X is Y.".to_string()));

        let mut session = ChatSession::new(backend);
        let outcome = session.send("What is X?").await;

        assert_eq!(outcome, SendOutcome::Replied);
        assert_eq!(
            session.messages(),
            [
                Message::agent(GREETING),
                Message::user("What is X?"),
                Message::agent("X is Y."),
            ]
        );
        assert!(!session.in_flight());
    }

    #[tokio::test]
    async fn test_completed_cycle_grows_log_by_exactly_two() {
        let mut backend = MockBackend::new();
        backend
            .expect_send_chat()
            .times(2)
            .returning(|_, _| Ok("ack".to_string()));

        let mut session = ChatSession::new(backend);
        let before = session.messages().len();

        session.send("one").await;
        assert_eq!(session.messages().len(), before + 2);

        session.send("two").await;
        assert_eq!(session.messages().len(), before + 4);
    }

    #[tokio::test]
    async fn test_send_failure_appends_synthetic_notice() {
        let mut backend = MockBackend::new();
        backend
            .expect_send_chat()
            .returning(|_, _| Err(status_error()));

        let mut session = ChatSession::new(backend);
        let outcome = session.send("ping").await;

        assert_eq!(outcome, SendOutcome::Failed);
        let messages = session.messages();
        assert_eq!(messages[messages.len() - 2], Message::user("ping"));
        assert_eq!(
            messages[messages.len() - 1],
            Message::agent(SEND_FAILURE_NOTICE)
        );
        assert!(!session.in_flight());
    }

    #[tokio::test]
    async fn test_failed_cycle_also_grows_log_by_exactly_two() {
        let mut backend = MockBackend::new();
        backend
            .expect_send_chat()
            .returning(|_, _| Err(status_error()));

        let mut session = ChatSession::new(backend);
        let before = session.messages().len();
        session.send("ping").await;
        assert_eq!(session.messages().len(), before + 2);
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_sends_are_no_ops() {
        // No expectation on the mock: any call would panic.
        let mut session = ChatSession::new(MockBackend::new());
        let before = session.messages().len();

        assert_eq!(session.send("").await, SendOutcome::Skipped);
        assert_eq!(session.send("   ").await, SendOutcome::Skipped);
        assert_eq!(session.messages().len(), before);
        assert!(!session.in_flight());
    }

    #[tokio::test]
    async fn test_send_while_in_flight_is_a_no_op() {
        let mut session = ChatSession::new(MockBackend::new());
        session.machine = StateMachine::with_state(SessionState::Sending);
        let before = session.messages().len();

        assert_eq!(session.send("hello").await, SendOutcome::Skipped);
        assert_eq!(session.messages().len(), before);
        assert!(session.in_flight());
    }

    #[tokio::test]
    async fn test_hydrate_replaces_log_wholesale() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_history()
            .returning(|| Ok(vec![Message::user("hi")]));

        let mut session = ChatSession::new(backend);
        session.hydrate().await;

        assert_eq!(session.messages(), [Message::user("hi")]);
    }

    #[tokio::test]
    async fn test_hydrate_with_empty_history_keeps_greeting() {
        let mut backend = MockBackend::new();
        backend.expect_fetch_history().returning(|| Ok(Vec::new()));

        let mut session = ChatSession::new(backend);
        session.hydrate().await;

        assert_eq!(session.messages(), [Message::agent(GREETING)]);
    }

    #[tokio::test]
    async fn test_hydrate_failure_keeps_greeting_and_is_swallowed() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_history()
            .returning(|| Err(status_error()));

        let mut session = ChatSession::new(backend);
        session.hydrate().await;

        assert_eq!(session.messages(), [Message::agent(GREETING)]);
        assert!(!session.in_flight());
    }

    #[tokio::test]
    async fn test_clear_history_success_empties_log() {
        let mut backend = MockBackend::new();
        backend.expect_clear_history().returning(|| Ok(()));

        let mut session = ChatSession::new(backend);
        session.clear_history().await.expect("cleared");

        assert!(session.messages().is_empty());
        assert!(!session.in_flight());
    }

    #[tokio::test]
    async fn test_clear_history_failure_leaves_log_unchanged() {
        let mut backend = MockBackend::new();
        backend
            .expect_send_chat()
            .returning(|_, _| Ok("X is Y.".to_string()));
        backend
            .expect_clear_history()
            .returning(|| Err(status_error()));

        let mut session = ChatSession::new(backend);
        session.send("What is X?").await;
        let before = session.messages().to_vec();

        let result = session.clear_history().await;
        assert!(result.is_err());
        assert_eq!(session.messages(), before.as_slice());
    }

    #[tokio::test]
    async fn test_seeded_greeting_is_from_agent() {
        let session = ChatSession::new(MockBackend::new());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Agent);
        assert_eq!(session.messages()[0].content, GREETING);
    }

    #[tokio::test]
    async fn test_duplicate_content_is_allowed() {
        let mut backend = MockBackend::new();
        backend
            .expect_send_chat()
            .withf(|message, _| message == "same")
            .times(2)
            .returning(|_, _| Ok("same".to_string()));

        let mut session = ChatSession::new(backend);
        session.send("same").await;
        session.send("same").await;
        assert_eq!(session.messages().len(), 5);
    }
}
