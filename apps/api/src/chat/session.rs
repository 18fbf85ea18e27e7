//! Chat Session Client — a thin conduit to a multi-turn conversation with the model.
//!
//! `ChatBackend::create_session` only captures configuration; the first network
//! call happens on `send_message`. The conversation context lives inside the
//! session handle, out of sight of the widget that owns it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::llm_client::{Content, LlmClient, LlmError, LlmRequest};

pub const NO_RESPONSE_TEXT: &str = "No response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub text: Option<String>,
}

impl ModelReply {
    pub fn text_or_default(&self) -> &str {
        self.text.as_deref().unwrap_or(NO_RESPONSE_TEXT)
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Llm(#[from] LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definitions
// ────────────────────────────────────────────────────────────────────────────

/// Factory for session handles bound to one system prompt.
pub trait ChatBackend: Send + Sync {
    fn create_session(&self, system_prompt: &str) -> Box<dyn ChatSession>;
}

#[async_trait]
pub trait ChatSession: Send {
    fn id(&self) -> Uuid;

    async fn send_message(&mut self, text: &str) -> Result<ModelReply, ChatError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct GeminiChatBackend {
    llm: LlmClient,
}

impl GeminiChatBackend {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

impl ChatBackend for GeminiChatBackend {
    fn create_session(&self, system_prompt: &str) -> Box<dyn ChatSession> {
        Box::new(GeminiChatSession {
            id: Uuid::new_v4(),
            llm: self.llm.clone(),
            system_prompt: system_prompt.to_string(),
            history: Vec::new(),
        })
    }
}

/// `generateContent` is stateless, so the handle replays completed turns on each call.
pub struct GeminiChatSession {
    id: Uuid,
    llm: LlmClient,
    system_prompt: String,
    history: Vec<Content>,
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    fn id(&self) -> Uuid {
        self.id
    }

    async fn send_message(&mut self, text: &str) -> Result<ModelReply, ChatError> {
        let mut contents = self.history.clone();
        contents.push(Content::user(text));

        let response = self
            .llm
            .call(LlmRequest {
                system: &self.system_prompt,
                contents: &contents,
                config: None,
            })
            .await?;

        let reply = ModelReply {
            text: response.text(),
        };

        // Failed or empty turns do not become part of the conversation.
        if let Some(reply_text) = &reply.text {
            self.history.push(Content::user(text));
            self.history.push(Content::model(reply_text.clone()));
        }
        debug!("Chat session {} now holds {} turns", self.id, self.history.len());

        Ok(reply)
    }
}
