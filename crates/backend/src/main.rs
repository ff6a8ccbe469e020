pub mod dashboards;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::middleware;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::routes::AppState;
use crate::shared::config::{load_config, ServerConfig};
use crate::shared::proxy_api::ProxyApiClient;
use crate::system::middleware::request_logger::request_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = load_config()?;
    tracing::info!(
        "Starting {} (environment: {}, debug: {})",
        config.app.name,
        config.app.environment,
        config.app.debug
    );

    let proxy = ProxyApiClient::new(&config.proxy)?;
    tracing::info!(
        "Proxy API: {} ({} token(s), timeout {}s)",
        config.proxy.url,
        config.proxy.tokens().len(),
        config.proxy.timeout_secs
    );

    let state = AppState {
        proxy: Arc::new(proxy),
        environment: config.app.environment.clone(),
        debug: config.app.debug,
    };

    let mut app = routes::configure_routes(state)
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(request_logger));

    if let Some(cors) = cors_layer(&config.server)? {
        app = app.layer(cors);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            // Ошибка останавливает приложение
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS только для явно перечисленных origin; пустой список - без CORS
fn cors_layer(server: &ServerConfig) -> anyhow::Result<Option<CorsLayer>> {
    if server.allowed_origins.is_empty() {
        return Ok(None);
    }

    let origins = server
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid allowed origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!("CORS enabled for: {}", server.allowed_origins.join(", "));
    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    ))
}
