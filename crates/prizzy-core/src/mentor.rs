//! The seam between the chat controller and a text-generation service.

use std::future::Future;

use anyhow::Result;
use serde::Serialize;

use crate::state::{ChatMessage, Sender};

/// Persona and ground rules sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are Prizzy, an expert forex trading mentor AI.
Your goal is to provide clear, insightful, and educational guidance on forex trading.
You must adhere to the following rules:
1.  **NEVER give financial advice.** Do not suggest specific trades, predict market movements, or tell users what to do with their money. Always include a disclaimer about not being a financial advisor.
2.  **Focus on education.** Explain concepts like risk management, technical analysis, fundamental analysis, and trading psychology.
3.  **Be encouraging but realistic.** Forex trading is difficult. Acknowledge the challenges while providing constructive feedback and learning resources.
4.  **Keep answers concise and well-structured.** Use lists, bold text, and clear headings to make information easy to digest.
5.  **When asked about calculations,** explain the formula and the concepts behind it rather than just giving a number. Guide the user to use the app's calculators for precise figures.
Example disclaimer: \"Remember, I am an AI mentor and not a financial advisor. All trading involves risk, and you should do your own research or consult with a qualified professional.\"";

/// First message of every conversation.
pub const GREETING: &str = "Hello! I am Prizzy, your AI forex mentor. How can I help you understand the markets today? Ask me about risk management, chart patterns, or trading psychology.";

/// Shown in place of a reply whenever the service call fails.
pub const FALLBACK_MESSAGE: &str = "I'm sorry, I'm having trouble connecting right now. Please check the console for any API key issues and try again later.";

/// One prior turn in the service's role vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// `"user"` or `"model"`
    pub role: &'static str,
    pub text: String,
}

impl From<&ChatMessage> for Turn {
    fn from(msg: &ChatMessage) -> Self {
        let role = match msg.sender {
            Sender::User => "user",
            Sender::Ai => "model",
        };
        Self {
            role,
            text: msg.text.clone(),
        }
    }
}

/// Translate local history into service turns, preserving order.
pub fn to_turns(history: &[ChatMessage]) -> Vec<Turn> {
    history.iter().map(Turn::from).collect()
}

/// Everything a single outbound call carries besides the system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorRequest {
    /// Conversation before `message`, oldest first.
    pub history: Vec<Turn>,
    pub message: String,
}

/// A text-generation backend for the mentor.
pub trait MentorService: Send + Sync {
    /// Generate the mentor's reply to `request.message`.
    fn generate(&self, request: &MentorRequest) -> impl Future<Output = Result<String>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_keep_order_and_map_roles() {
        let history = vec![
            ChatMessage::user("what is a pip?"),
            ChatMessage::ai("the smallest price move"),
            ChatMessage::user("and a lot?"),
        ];
        let turns = to_turns(&history);
        let roles: Vec<_> = turns.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(turns[0].text, "what is a pip?");
        assert_eq!(turns[1].text, "the smallest price move");
        assert_eq!(turns[2].text, "and a lot?");
    }
}
