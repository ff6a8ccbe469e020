use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d410_store_sales::{HealthResponse, SalesResponse, Store};

use crate::dashboards::d410_store_sales::service;
use crate::routes::AppState;
use crate::shared::proxy_api::ProxyApiError;

type HandlerError = (StatusCode, String);

/// Параметры `/api/sales`
///
/// `store_ids` можно передать несколько раз или списком через запятую.
#[derive(Debug, PartialEq)]
pub struct SalesParams {
    pub store_ids: Vec<i64>,
    pub start_date: String,
    pub end_date: String,
}

impl SalesParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, String> {
        let mut store_ids = Vec::new();
        let mut start_date = None;
        let mut end_date = None;

        for (key, value) in pairs {
            match key.as_str() {
                "store_ids" => {
                    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                        let id = part
                            .parse::<i64>()
                            .map_err(|_| format!("invalid store id: {}", part))?;
                        store_ids.push(id);
                    }
                }
                "start_date" => start_date = Some(value.trim().to_string()),
                "end_date" => end_date = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let start_date = start_date
            .filter(|d| !d.is_empty())
            .ok_or_else(|| "start_date is required".to_string())?;
        let end_date = end_date
            .filter(|d| !d.is_empty())
            .ok_or_else(|| "end_date is required".to_string())?;
        if store_ids.is_empty() {
            return Err("store_ids must not be empty".to_string());
        }

        Ok(Self {
            store_ids,
            start_date,
            end_date,
        })
    }
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, HandlerError> {
    match service::health(state.proxy.as_ref(), &state.environment).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => Err(upstream_error(&state, "Failed to check Proxy API health", e)),
    }
}

/// GET /api/stores
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<Store>>, HandlerError> {
    match service::list_stores(state.proxy.as_ref()).await {
        Ok(stores) => Ok(Json(stores)),
        Err(e) => Err(upstream_error(&state, "Failed to list stores", e)),
    }
}

/// GET /api/sales
pub async fn get_sales(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SalesResponse>, HandlerError> {
    let params = SalesParams::from_pairs(&pairs).map_err(|message| {
        tracing::warn!("Rejected sales request: {}", message);
        (StatusCode::BAD_REQUEST, message)
    })?;

    match service::get_sales(
        state.proxy.as_ref(),
        &params.store_ids,
        &params.start_date,
        &params.end_date,
    )
    .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => Err(upstream_error(&state, "Failed to load sales", e)),
    }
}

/// Некорректные данные из базы - 500, остальные сбои Proxy API - 502
fn upstream_error(state: &AppState, context: &str, error: ProxyApiError) -> HandlerError {
    tracing::error!("{}: {}", context, error);
    let status = match error {
        ProxyApiError::MalformedRow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    let message = if state.debug {
        error.to_string()
    } else {
        context.to_string()
    };
    (status, message)
}
