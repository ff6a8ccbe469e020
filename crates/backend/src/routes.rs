use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers;
use crate::shared::proxy_api::ProxyApi;

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<dyn ProxyApi>,
    pub environment: String,
    /// Отдавать клиенту текст ошибок Proxy API
    pub debug: bool,
}

/// Конфигурация всех роутов API
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        // D410 Store Sales
        .route("/api/health", get(handlers::d410_store_sales::health))
        .route("/api/stores", get(handlers::d410_store_sales::list_stores))
        .route("/api/sales", get(handlers::d410_store_sales::get_sales))
        .with_state(state)
}
