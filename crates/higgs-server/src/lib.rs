//! Higgs Server - HTTP API in front of a Higgs Audio serve engine.

pub mod handlers;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use higgs_core::{HttpServeEngine, Result, ServeEngine, ServerConfig};

pub use state::AppState;

/// Largest accepted request body (reference recordings are uploaded whole).
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Build the router with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/generate", post(handlers::generate))
        .route("/clone-voice", post(handlers::clone_voice))
        .route("/voices", get(handlers::list_voices))
        .route(
            "/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Connect the configured engine, if any.
pub fn connect_engine(config: &ServerConfig) -> Result<Option<Arc<dyn ServeEngine>>> {
    let Some(url) = config.engine_url.as_deref() else {
        tracing::warn!("no engine URL configured; serving without a model");
        return Ok(None);
    };

    tracing::info!(
        url,
        model = %config.model.model_path,
        audio_tokenizer = %config.model.audio_tokenizer_path,
        device = %config.model.device,
        "attaching serve engine"
    );
    let engine: Arc<dyn ServeEngine> = Arc::new(HttpServeEngine::new(
        url,
        config.model.clone(),
        config.engine_timeout,
    )?);
    Ok(Some(engine))
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: ServerConfig, engine: Option<Arc<dyn ServeEngine>>) -> Result<()> {
    let state = AppState::new(engine, config.defaults);
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
