//! Mentor chat controller
//!
//! A two-state machine over an append-only message list. `submit` opens a
//! request and `resolve` closes it; the caller owns the actual service call,
//! so the controller can be driven from a UI event loop or directly in tests.

use anyhow::Result;
use tracing::{debug, error, warn};

use crate::mentor::{to_turns, MentorRequest, FALLBACK_MESSAGE, GREETING};
use crate::state::ChatMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: ChatState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A fresh conversation holding only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::ai(GREETING)],
            state: ChatState::Idle,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    /// Whether `input` would be accepted by [`submit`](Self::submit).
    pub fn can_submit(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_awaiting()
    }

    /// Record the user's message and return the request to send.
    ///
    /// Returns `None`, changing nothing, for blank input or while a reply is
    /// still outstanding.
    pub fn submit(&mut self, input: &str) -> Option<MentorRequest> {
        if !self.can_submit(input) {
            if self.is_awaiting() {
                debug!("Ignoring submission while a reply is outstanding");
            }
            return None;
        }

        let history = to_turns(&self.messages);
        self.messages.push(ChatMessage::user(input));
        self.state = ChatState::AwaitingResponse;

        Some(MentorRequest {
            history,
            message: input.to_string(),
        })
    }

    /// Append the outcome of the outstanding request and return to idle.
    pub fn resolve(&mut self, outcome: Result<String>) {
        if !self.is_awaiting() {
            warn!("Discarding mentor reply with no request outstanding");
            return;
        }

        let text = match outcome {
            Ok(text) => text,
            Err(e) => {
                error!("Error getting AI response: {:#}", e);
                FALLBACK_MESSAGE.to_string()
            }
        };
        self.messages.push(ChatMessage::ai(text));
        self.state = ChatState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::MentorService;
    use crate::state::Sender;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoMentor {
        calls: AtomicUsize,
    }

    impl MentorService for EchoMentor {
        async fn generate(&self, request: &MentorRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("echo: {}", request.message))
        }
    }

    struct DownMentor;

    impl MentorService for DownMentor {
        async fn generate(&self, _request: &MentorRequest) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    #[test]
    fn test_starts_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.messages(), &[ChatMessage::ai(GREETING)]);
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut session = ChatSession::new();
        assert!(session.submit("").is_none());
        assert!(session.submit("   \t").is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn test_submit_carries_prior_history_only() {
        let mut session = ChatSession::new();
        let request = session.submit("What is leverage?").unwrap();

        assert_eq!(request.message, "What is leverage?");
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.history[0].role, "model");
        assert_eq!(request.history[0].text, GREETING);

        assert_eq!(session.state(), ChatState::AwaitingResponse);
        assert_eq!(session.messages().last(), Some(&ChatMessage::user("What is leverage?")));
    }

    #[test]
    fn test_submit_while_awaiting_is_a_no_op() {
        let mut session = ChatSession::new();
        assert!(session.submit("first").is_some());
        assert!(session.submit("second").is_none());

        let users = session
            .messages()
            .iter()
            .filter(|m| m.sender == Sender::User)
            .count();
        assert_eq!(users, 1);
        assert!(session.is_awaiting());
    }

    #[tokio::test]
    async fn test_round_trip_appends_reply() {
        let mentor = EchoMentor {
            calls: AtomicUsize::new(0),
        };
        let mut session = ChatSession::new();

        let request = session.submit("hi").unwrap();
        assert!(session.submit("again").is_none());
        let reply = mentor.generate(&request).await;
        session.resolve(reply);

        assert_eq!(mentor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.state(), ChatState::Idle);
        assert_eq!(session.messages().last(), Some(&ChatMessage::ai("echo: hi")));

        // The next request sees the whole conversation so far.
        let request = session.submit("more").unwrap();
        let roles: Vec<_> = request.history.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec!["model", "user", "model"]);
    }

    #[tokio::test]
    async fn test_failure_appends_single_fallback_and_recovers() {
        let mut session = ChatSession::new();
        let request = session.submit("hello?").unwrap();
        session.resolve(DownMentor.generate(&request).await);

        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1], ChatMessage::user("hello?"));
        assert_eq!(session.messages()[2], ChatMessage::ai(FALLBACK_MESSAGE));
        assert_eq!(session.state(), ChatState::Idle);
        assert!(session.submit("try again").is_some());
    }

    #[test]
    fn test_resolve_without_request_is_discarded() {
        let mut session = ChatSession::new();
        session.resolve(Ok("stray".to_string()));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.state(), ChatState::Idle);
    }
}
