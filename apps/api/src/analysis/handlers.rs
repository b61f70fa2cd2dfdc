use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::highlighter::{highlight, Span};

#[derive(Deserialize)]
pub struct HighlightRequest {
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub active_keyword: Option<String>,
}

#[derive(Serialize)]
pub struct HighlightResponse {
    pub spans: Vec<Span>,
}

/// POST /api/v1/highlight
pub async fn handle_highlight(Json(req): Json<HighlightRequest>) -> Json<HighlightResponse> {
    let spans = highlight(&req.text, &req.keywords, req.active_keyword.as_deref());
    Json(HighlightResponse { spans })
}
