pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::chat::handlers as chat;
use crate::generation::handlers as workspace;
use crate::markdown::handlers as markdown;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form / output workspace
        .route("/api/v1/workspace", get(workspace::handle_get_workspace))
        .route(
            "/api/v1/workspace/generate",
            post(workspace::handle_generate),
        )
        .route("/api/v1/workspace/tab", put(workspace::handle_select_tab))
        .route("/api/v1/workspace/copy", post(workspace::handle_copy))
        // Chat widget
        .route("/api/v1/chat", get(chat::handle_get_chat))
        .route("/api/v1/chat/toggle", post(chat::handle_toggle))
        .route("/api/v1/chat/input", put(chat::handle_set_input))
        .route("/api/v1/chat/messages", post(chat::handle_send_message))
        // Stateless renderer preview
        .route("/api/v1/render", post(markdown::handle_render))
        .with_state(state)
}
