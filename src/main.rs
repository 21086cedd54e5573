use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use art_curator::api;
use art_curator::config::Config;
use art_curator::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Catalogue: {}", config.catalogue_path.display());
    tracing::info!(
        "LLM provider: {} ({}), enabled: {}",
        config.llm.provider,
        config.llm.base_url,
        config.llm.is_enabled()
    );

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        // Serve frontend
        .route("/", get(serve_index))
        // API routes
        .route("/api/search", post(api::search::search))
        .route("/api/artworks", get(api::catalogue::list_artworks))
        .route("/api/facets", get(api::catalogue::get_facets))
        .route("/api/catalogue/reload", post(api::catalogue::reload_catalogue))
        .route("/api/analyze", post(api::analyze::analyze))
        .route("/api/config", get(api::catalogue::get_config))
        .with_state(state)
        .fallback(get(serve_index));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
