use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use contracts::dashboards::d410_store_sales::ProxyHealth;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::shared::config::ProxyConfig;

/// Строка результата запроса: имя колонки -> значение
pub type Row = serde_json::Map<String, Value>;

/// Ошибки обращения к Proxy API
#[derive(Error, Debug)]
pub enum ProxyApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication with Proxy API failed")]
    Auth,

    #[error("Proxy API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON from Proxy API: {0}")]
    InvalidJson(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),
}

/// Операции Proxy API, нужные дашборду
#[async_trait]
pub trait ProxyApi: Send + Sync {
    async fn health(&self) -> Result<ProxyHealth, ProxyApiError>;

    async fn execute_query(&self, query: &str, params: &[Value])
        -> Result<Vec<Row>, ProxyApiError>;
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "no_params")]
    params: &'a [Value],
}

fn no_params(params: &&[Value]) -> bool {
    params.is_empty()
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<Row>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP-клиент Proxy API с ротацией токенов
///
/// На 401 клиент переключается на следующий токен и повторяет запрос;
/// каждый токен пробуется не больше одного раза. Рабочий токен запоминается
/// для следующих запросов.
pub struct ProxyApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Vec<String>,
    token_index: AtomicUsize,
}

impl ProxyApiClient {
    pub fn new(config: &ProxyConfig) -> anyhow::Result<Self> {
        let tokens = config.tokens();
        if tokens.is_empty() {
            anyhow::bail!("No Proxy API token provided");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build Proxy API HTTP client")?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            tokens,
            token_index: AtomicUsize::new(0),
        })
    }

    fn current_token(&self) -> &str {
        let index = self.token_index.load(Ordering::Relaxed) % self.tokens.len();
        &self.tokens[index]
    }

    /// false, если переключаться не на что
    fn switch_token(&self) -> bool {
        if self.tokens.len() <= 1 {
            return false;
        }
        let len = self.tokens.len();
        let _ = self
            .token_index
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| Some((i + 1) % len));
        true
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&QueryRequest<'_>>,
    ) -> Result<Value, ProxyApiError> {
        let url = format!("{}{}", self.base_url, path);

        for _ in 0..self.tokens.len() {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .bearer_auth(self.current_token());
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|e| ProxyApiError::Transport(e.to_string()))?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                if self.switch_token() {
                    tracing::warn!("Proxy API rejected token, switching to the next one");
                    continue;
                }
                return Err(ProxyApiError::Auth);
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| ProxyApiError::Transport(e.to_string()))?;

            if status.is_client_error() || status.is_server_error() {
                return Err(ProxyApiError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }

            return serde_json::from_slice(&bytes)
                .map_err(|e| ProxyApiError::InvalidJson(e.to_string()));
        }

        tracing::error!("All Proxy API tokens were rejected");
        Err(ProxyApiError::Auth)
    }
}

#[async_trait]
impl ProxyApi for ProxyApiClient {
    async fn health(&self) -> Result<ProxyHealth, ProxyApiError> {
        let payload = self.request(Method::GET, "/api/health", None).await?;
        serde_json::from_value(payload).map_err(|e| ProxyApiError::InvalidJson(e.to_string()))
    }

    async fn execute_query(
        &self,
        query: &str,
        params: &[Value],
    ) -> Result<Vec<Row>, ProxyApiError> {
        let body = QueryRequest { query, params };
        let payload = self.request(Method::POST, "/api/query", Some(&body)).await?;
        let response: QueryResponse = serde_json::from_value(payload)
            .map_err(|e| ProxyApiError::InvalidJson(e.to_string()))?;

        if !response.success {
            return Err(ProxyApiError::Query(
                response
                    .error
                    .unwrap_or_else(|| "Unknown query error".to_string()),
            ));
        }
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, primary: &str, fallback: &str) -> ProxyApiClient {
        ProxyApiClient::new(&ProxyConfig {
            url: format!("{}/", server.uri()),
            primary_token: primary.to_string(),
            fallback_token: fallback.to_string(),
            timeout_secs: 5,
        })
        .expect("proxy client")
    }

    #[test]
    fn test_requires_a_token() {
        assert!(ProxyApiClient::new(&ProxyConfig::default()).is_err());
    }

    #[tokio::test]
    async fn test_execute_query_returns_rows() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/query"))
            .and(header("authorization", "Bearer primary"))
            .and(body_json(json!({ "query": "SELECT 1", "params": [1, "2024-01-01"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "ID": 1, "NAME": "Ваке" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let rows = client(&server, "primary", "")
            .execute_query("SELECT 1", &[json!(1), json!("2024-01-01")])
            .await
            .expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["NAME"], json!("Ваке"));
    }

    #[tokio::test]
    async fn test_empty_params_are_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/query"))
            .and(body_json(json!({ "query": "SELECT 1" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rows = client(&server, "primary", "")
            .execute_query("SELECT 1", &[])
            .await
            .expect("rows");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_rotates_to_fallback_token_on_401() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer primary"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer fallback"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server, "primary", "fallback");
        client.execute_query("SELECT 1", &[]).await.expect("first");
        // рабочий токен запомнен, основной больше не пробуется
        client.execute_query("SELECT 1", &[]).await.expect("second");
    }

    #[tokio::test]
    async fn test_all_tokens_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let result = client(&server, "primary", "fallback").health().await;
        assert!(matches!(result, Err(ProxyApiError::Auth)));
    }

    #[tokio::test]
    async fn test_single_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server, "primary", "").health().await;
        assert!(matches!(result, Err(ProxyApiError::Auth)));
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
            .mount(&server)
            .await;

        match client(&server, "primary", "").execute_query("SELECT 1", &[]).await {
            Err(ProxyApiError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "database is down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = client(&server, "primary", "").health().await;
        assert!(matches!(result, Err(ProxyApiError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_unsuccessful_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "Dynamic SQL Error"
            })))
            .mount(&server)
            .await;

        match client(&server, "primary", "").execute_query("SELECT", &[]).await {
            Err(ProxyApiError::Query(message)) => assert_eq!(message, "Dynamic SQL Error"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_keeps_extra_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "database_connected": true,
                "version": "1.4.0"
            })))
            .mount(&server)
            .await;

        let health = client(&server, "primary", "").health().await.expect("health");
        assert!(health.database_connected);
        assert_eq!(health.extra.get("version"), Some(&json!("1.4.0")));
    }
}
