use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::catalogue::filter::facets;
use crate::models::{ArtworkRecord, Facets, ReloadResponse};
use crate::state::AppState;

/// GET /api/artworks - The current catalogue in its original order
pub async fn list_artworks(State(state): State<AppState>) -> Json<Vec<ArtworkRecord>> {
    Json(state.snapshot().artworks().to_vec())
}

/// GET /api/facets - Choices for the artist, suburb and price filters
pub async fn get_facets(State(state): State<AppState>) -> Json<Facets> {
    Json(facets(state.snapshot().artworks()))
}

/// POST /api/catalogue/reload - Re-read the catalogue export from disk
pub async fn reload_catalogue(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    let reload_state = state.clone();
    let artworks = tokio::task::spawn_blocking(move || reload_state.reload_catalogue())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Catalogue reload error: {e}"),
            )
        })?
        .map_err(|e| {
            tracing::error!("Catalogue reload failed: {e:#}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Catalogue reload failed: {e:#}"),
            )
        })?;

    Ok(Json(ReloadResponse { artworks }))
}

/// GET /api/config - Ranking and LLM settings (the API key is never returned)
pub async fn get_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "llm": state.config.llm,
        "llm_enabled": state.config.llm.is_enabled(),
        "ranking": state.config.ranking,
        "catalogue_loaded_at": state.snapshot().loaded_at(),
    }))
}
