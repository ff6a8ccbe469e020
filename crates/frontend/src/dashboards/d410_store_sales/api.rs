use contracts::dashboards::d410_store_sales::{HealthResponse, SalesResponse, Store};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

const API_BASE: &str = "/api";

/// Проверка состояния backend и Proxy API
pub async fn fetch_health() -> Result<HealthResponse, String> {
    get_json(&format!("{}/health", API_BASE)).await
}

/// Список магазинов
pub async fn fetch_stores() -> Result<Vec<Store>, String> {
    get_json(&format!("{}/stores", API_BASE)).await
}

/// Продажи по магазинам за период
pub async fn fetch_sales(
    store_ids: Vec<i64>,
    start_date: String,
    end_date: String,
) -> Result<SalesResponse, String> {
    get_json(&sales_url(&store_ids, &start_date, &end_date)).await
}

/// `/api/sales?store_ids=1&store_ids=2&start_date=...&end_date=...`
pub fn sales_url(store_ids: &[i64], start_date: &str, end_date: &str) -> String {
    let mut params: Vec<String> = store_ids
        .iter()
        .map(|id| format!("store_ids={}", id))
        .collect();
    params.push(format!("start_date={}", urlencoding::encode(start_date)));
    params.push(format!("end_date={}", urlencoding::encode(end_date)));
    format!("{}/sales?{}", API_BASE, params.join("&"))
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_url_repeats_store_ids() {
        assert_eq!(
            sales_url(&[1, 2], "2024-01-01", "2024-01-31"),
            "/api/sales?store_ids=1&store_ids=2&start_date=2024-01-01&end_date=2024-01-31"
        );
    }

    #[test]
    fn test_sales_url_encodes_dates() {
        assert_eq!(
            sales_url(&[3], "2024 01", "x&y"),
            "/api/sales?store_ids=3&start_date=2024%2001&end_date=x%26y"
        );
    }
}
