//! Chat: the widget's offline keyword matcher and the generative-language proxy.

pub mod knowledge;
#[cfg(feature = "server")]
mod gemini;

pub use knowledge::{find_answer, ChatLog, ChatMessage, Speaker, FALLBACK, SUGGESTIONS, WELCOME};
#[cfg(feature = "server")]
pub use gemini::{ChatError, GeminiClient, SYSTEM_PROMPT};

use serde::{Deserialize, Serialize};

/// One prior turn, in the generative-language API's own shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `"user"` or `"model"`.
    pub role: String,
    pub parts: Vec<ChatPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPart {
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![ChatPart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![ChatPart { text: text.into() }],
        }
    }
}
