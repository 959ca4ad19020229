pub mod handlers;
pub mod types;

use crate::{Result, config::Config, config::CorsConfig, llm::OpenAiClient};
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    // One client for the process lifetime, injected into the handlers.
    let llm = OpenAiClient::new(config.openai.clone());
    let app_state = handlers::AppState { llm: Arc::new(llm) };

    let app = router(app_state, &config.cors);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: handlers::AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/generate", post(handlers::generate))
        .route("/upload", post(handlers::upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

/// Credentialed CORS cannot use the wildcard `Any` forms, so origins are
/// matched against the configured allow-list and the method/header sets are
/// enumerated.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let patterns = config.allowed_origins.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin
                .to_str()
                .map(|origin| origin_allowed(&patterns, origin))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn origin_allowed(patterns: &[String], origin: &str) -> bool {
    patterns.iter().any(|pattern| {
        match pattern.split_once("://*.") {
            // "https://*.vercel.app" matches any subdomain of vercel.app,
            // but not "https://evil-vercel.app".
            Some((scheme, suffix)) => origin
                .strip_prefix(scheme)
                .and_then(|rest| rest.strip_prefix("://"))
                .map(|host| host.ends_with(&format!(".{}", suffix)))
                .unwrap_or(false),
            None => pattern == origin,
        }
    })
}
