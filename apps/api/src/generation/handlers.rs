//! Axum route handlers for the workspace (form/output) API.

use std::convert::Infallible;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::GeneratedAssets;
use crate::generation::orchestrator::{
    ActiveTab, Clipboard, CopyError, FormOrchestrator, FormState, SubmitOutcome,
};
use crate::markdown::{render, MarkdownNode};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: ActiveTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Loading,
    Ready,
}

/// Everything the page needs to draw the form and output panes.
#[derive(Debug, Serialize)]
pub struct WorkspaceView {
    pub status: FormStatus,
    pub assets: Option<GeneratedAssets>,
    pub active_tab: ActiveTab,
    /// Rendered active-tab document; empty unless ready.
    pub nodes: Vec<MarkdownNode>,
    /// Alerts raised since the last view, oldest first.
    pub alerts: Vec<String>,
}

impl WorkspaceView {
    /// Snapshots the orchestrator and drains its pending alerts.
    fn drain(form: &mut FormOrchestrator) -> Self {
        let status = match form.state() {
            FormState::Idle => FormStatus::Idle,
            FormState::Loading => FormStatus::Loading,
            FormState::Ready(_) => FormStatus::Ready,
        };
        Self {
            status,
            assets: form.assets().cloned(),
            active_tab: form.active_tab(),
            nodes: form.active_text().map(render).unwrap_or_default(),
            alerts: form.take_alerts(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    /// Text for the browser to place on the system clipboard.
    pub text: String,
    pub alerts: Vec<String>,
}

/// Clipboard that hands the text back to the page, which owns the platform clipboard.
#[derive(Debug, Default)]
struct ResponseClipboard {
    text: Option<String>,
}

impl Clipboard for ResponseClipboard {
    type Error = Infallible;

    fn write_text(&mut self, text: &str) -> Result<(), Infallible> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

fn not_ready() -> AppError {
    AppError::Conflict("No generated assets yet".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/workspace
pub async fn handle_get_workspace(State(state): State<AppState>) -> Json<WorkspaceView> {
    let mut form = state.workspace.lock().await;
    Json(WorkspaceView::drain(&mut form))
}

/// POST /api/v1/workspace/generate
///
/// Blank notes leave the workspace untouched. A second submit while one is
/// in flight is rejected with 409.
///
/// The generator call and `finish` run on a spawned task, so the workspace
/// leaves `Loading` even when the client goes away mid-request.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<WorkspaceView>, AppError> {
    let outcome = state.workspace.lock().await.begin_submit(&request.notes);

    match outcome {
        SubmitOutcome::Busy => {
            return Err(AppError::Conflict(
                "A generation is already in progress".to_string(),
            ))
        }
        SubmitOutcome::Ignored => {}
        SubmitOutcome::Started(notes) => {
            let task_state = state.clone();
            tokio::spawn(async move {
                let result = task_state.generator.generate(&notes).await;
                task_state.workspace.lock().await.finish(result);
            })
            .await
            .map_err(|e| AppError::Internal(e.into()))?;
        }
    }

    let mut form = state.workspace.lock().await;
    Ok(Json(WorkspaceView::drain(&mut form)))
}

/// PUT /api/v1/workspace/tab
pub async fn handle_select_tab(
    State(state): State<AppState>,
    Json(request): Json<SelectTabRequest>,
) -> Result<Json<WorkspaceView>, AppError> {
    let mut form = state.workspace.lock().await;
    form.select_tab(request.tab).map_err(|_| not_ready())?;
    Ok(Json(WorkspaceView::drain(&mut form)))
}

/// POST /api/v1/workspace/copy
pub async fn handle_copy(State(state): State<AppState>) -> Result<Json<CopyResponse>, AppError> {
    let mut form = state.workspace.lock().await;
    let mut clipboard = ResponseClipboard::default();

    form.copy_active(&mut clipboard).map_err(|e| match e {
        CopyError::NotReady => not_ready(),
        CopyError::Clipboard(never) => match never {},
    })?;

    Ok(Json(CopyResponse {
        text: clipboard.text.unwrap_or_default(),
        alerts: form.take_alerts(),
    }))
}
