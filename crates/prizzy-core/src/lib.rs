pub mod ai;
pub mod calculators;
pub mod chat;
pub mod config;
pub mod format;
pub mod mentor;
pub mod pair;
pub mod state;

// Re-export main types for convenience
pub use ai::GeminiClient;
pub use calculators::{
    CalculatorSet, PipValueInputs, PositionSizeInputs, PositionSizeOutput, ProfitLossInputs,
    ProfitLossOutput, RiskRewardInputs, Tone,
};
pub use chat::{ChatSession, ChatState};
pub use config::{Config, Settings};
pub use format::{format_message, Segment};
pub use mentor::{MentorRequest, MentorService, Turn};
pub use pair::CurrencyPair;
pub use state::{ChatMessage, Sender};
