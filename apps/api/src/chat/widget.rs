//! Chat Widget Orchestrator — message list, open flag and one send cycle at a time.
//!
//! A send is split in three so the widget can sit behind a lock without holding
//! it across the network call: `begin_send` → `PendingSend::dispatch` → `finish_send`.
//! While a send is in flight the session handle travels inside the `PendingSend`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::chat::prompts::ASSISTANT_SYSTEM;
use crate::chat::session::{ChatBackend, ChatError, ChatMessage, ChatSession, ModelReply};

pub const CHAT_ERROR_TEXT: &str = "Sorry, I encountered an error.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendCycle {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// A message on its way to the model. Owns the session handle until completion.
pub struct PendingSend {
    session: Box<dyn ChatSession>,
    text: String,
}

impl PendingSend {
    pub async fn dispatch(mut self) -> CompletedSend {
        let result = self.session.send_message(&self.text).await;
        CompletedSend {
            session: self.session,
            result,
        }
    }
}

pub struct CompletedSend {
    session: Box<dyn ChatSession>,
    result: Result<ModelReply, ChatError>,
}

pub struct ChatWidget {
    backend: Arc<dyn ChatBackend>,
    session: Option<Box<dyn ChatSession>>,
    open: bool,
    input: String,
    messages: Vec<ChatMessage>,
    cycle: SendCycle,
    revision: u64,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            session: None,
            open: false,
            input: String::new(),
            messages: Vec::new(),
            cycle: SendCycle::Idle,
            revision: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn cycle(&self) -> SendCycle {
        self.cycle
    }

    pub fn is_sending(&self) -> bool {
        self.cycle == SendCycle::Sending
    }

    /// Bumped on every append; clients scroll when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Index of the newest message, which the view keeps in sight.
    pub fn scroll_anchor(&self) -> Option<usize> {
        self.messages.len().checked_sub(1)
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.revision += 1;
    }

    /// Starts a send. Returns `None` for blank text or while another send is in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        if text.trim().is_empty() || self.is_sending() {
            return None;
        }

        let session = match self.session.take() {
            Some(session) => session,
            None => {
                let session = self.backend.create_session(ASSISTANT_SYSTEM);
                info!("Created chat session {}", session.id());
                session
            }
        };

        self.push(ChatMessage::user(text));
        self.input.clear();
        self.cycle = SendCycle::Sending;

        Some(PendingSend {
            session,
            text: text.to_string(),
        })
    }

    /// Returns the session to the widget and records the reply. Errors end up in the transcript.
    pub fn finish_send(&mut self, completed: CompletedSend) {
        self.session = Some(completed.session);
        match completed.result {
            Ok(reply) => {
                self.push(ChatMessage::model(reply.text_or_default()));
                self.cycle = SendCycle::Succeeded;
            }
            Err(e) => {
                error!("Chat turn failed: {e}");
                self.push(ChatMessage::model(CHAT_ERROR_TEXT));
                self.cycle = SendCycle::Failed;
            }
        }
    }
}
