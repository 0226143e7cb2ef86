//! TruthGuard Web Server
//!
//! Axum-based server exposing the content analysis endpoint.

pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method},
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use truthguard_core::Analyzer;

use state::AppState;

/// Path of the analysis endpoint.
pub const ANALYZE_PATH: &str = "/functions/v1/analyze-content";

/// Request body limit; fits an inlined 10 MiB image.
pub const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // OPTIONS requests are answered by the CORS layer with an empty body.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route(ANALYZE_PATH, post(routes::analyze::analyze_content))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(analyzer: Analyzer, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(AppState::new(analyzer));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Analysis endpoint listening on http://{}:{}{}", host, port, ANALYZE_PATH);

    axum::serve(listener, app).await?;
    Ok(())
}
