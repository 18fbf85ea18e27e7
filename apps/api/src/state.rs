use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chat::session::ChatBackend;
use crate::chat::widget::ChatWidget;
use crate::generation::generator::AssetGenerator;
use crate::generation::orchestrator::FormOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The orchestrator locks are only held for their synchronous transitions,
/// never across a model call.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation backend. Default: GeminiAssetGenerator.
    pub generator: Arc<dyn AssetGenerator>,
    pub workspace: Arc<Mutex<FormOrchestrator>>,
    pub chat: Arc<Mutex<ChatWidget>>,
}

impl AppState {
    pub fn new(generator: Arc<dyn AssetGenerator>, chat_backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            generator,
            workspace: Arc::new(Mutex::new(FormOrchestrator::new())),
            chat: Arc::new(Mutex::new(ChatWidget::new(chat_backend))),
        }
    }
}
