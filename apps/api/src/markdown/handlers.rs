use axum::Json;
use serde::{Deserialize, Serialize};

use crate::markdown::{render, MarkdownNode};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub nodes: Vec<MarkdownNode>,
}

/// POST /api/v1/render
///
/// Renders arbitrary text with the line renderer used for generated assets.
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse {
        nodes: render(&request.text),
    })
}
