use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::llm::vision::analyze_artwork;
use crate::models::{AnalyzeRequest, ArtworkAnalysis};
use crate::state::AppState;

/// POST /api/analyze - Theme, palette and emotion for an uploaded image
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ArtworkAnalysis>, (StatusCode, String)> {
    if req.image_base64.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Image is required".to_string()));
    }
    if !req.mime.starts_with("image/") {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unsupported content type: {}", req.mime),
        ));
    }
    if !state.config.llm.is_enabled() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "AI analysis is not configured".to_string(),
        ));
    }

    match analyze_artwork(&state.http_client, &state.config.llm, &req.image_base64, &req.mime).await
    {
        Ok(analysis) => Ok(Json(analysis)),
        Err(e) => {
            tracing::warn!("Artwork analysis failed: {e:#}");
            Err((StatusCode::BAD_GATEWAY, format!("AI analysis failed: {e}")))
        }
    }
}
