//! Axum route handlers for the chat widget API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::session::ChatMessage;
use crate::chat::widget::{ChatWidget, SendCycle};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct ChatView {
    pub open: bool,
    pub input: String,
    pub messages: Vec<ChatMessage>,
    pub cycle: SendCycle,
    pub sending: bool,
    /// Index of the message the view must scroll to.
    pub scroll_anchor: Option<usize>,
    pub revision: u64,
}

impl From<&ChatWidget> for ChatView {
    fn from(widget: &ChatWidget) -> Self {
        Self {
            open: widget.is_open(),
            input: widget.input().to_string(),
            messages: widget.messages().to_vec(),
            cycle: widget.cycle(),
            sending: widget.is_sending(),
            scroll_anchor: widget.scroll_anchor(),
            revision: widget.revision(),
        }
    }
}

/// GET /api/v1/chat
pub async fn handle_get_chat(State(state): State<AppState>) -> Json<ChatView> {
    let widget = state.chat.lock().await;
    Json(ChatView::from(&*widget))
}

/// POST /api/v1/chat/toggle
pub async fn handle_toggle(State(state): State<AppState>) -> Json<ChatView> {
    let mut widget = state.chat.lock().await;
    widget.toggle();
    Json(ChatView::from(&*widget))
}

/// PUT /api/v1/chat/input
pub async fn handle_set_input(
    State(state): State<AppState>,
    Json(request): Json<InputRequest>,
) -> Json<ChatView> {
    let mut widget = state.chat.lock().await;
    widget.set_input(request.input);
    Json(ChatView::from(&*widget))
}

/// POST /api/v1/chat/messages
///
/// Model failures never surface here: they land in the transcript as an
/// apology message. Blank messages are ignored, even during an in-flight
/// turn; other sends during an in-flight turn are rejected with 409.
///
/// The model call and `finish_send` run on a spawned task, so the session
/// handle returns to the widget even when the client goes away mid-request.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatView>, AppError> {
    let pending = {
        let mut widget = state.chat.lock().await;
        let busy = widget.is_sending();
        match widget.begin_send(&request.message) {
            Some(pending) => pending,
            None if busy && !request.message.trim().is_empty() => {
                return Err(AppError::Conflict(
                    "A chat reply is still pending".to_string(),
                ))
            }
            None => return Ok(Json(ChatView::from(&*widget))),
        }
    };

    let task_state = state.clone();
    tokio::spawn(async move {
        let completed = pending.dispatch().await;
        task_state.chat.lock().await.finish_send(completed);
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    let widget = state.chat.lock().await;
    Ok(Json(ChatView::from(&*widget)))
}
