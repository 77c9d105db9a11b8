//! HTTP client for the GDELT Cloud query endpoint

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::query::{QueryRequest, QueryResult, QueryTable};

/// Output format requested from the store
pub const QUERY_FORMAT: &str = "JSONEachRow";

pub const DEFAULT_BASE_URL: &str = "https://gdeltcloud.com";

const QUERY_PATH: &str = "/api/clickhouse/query";
const HEALTH_PATH: &str = "/api/health";

const AUTH_REQUIRED_MESSAGE: &str =
    "Authentication required. Please provide valid OAuth token or API key.";
const TIMEOUT_MESSAGE: &str =
    "Query timeout. Try reducing query scope or adding more specific filters.";

/// Where and how long to talk to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GdeltClientConfig {
    pub base_url: String,
    pub query_timeout: Duration,
    pub health_timeout: Duration,
}

impl GdeltClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }
}

impl Default for GdeltClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Error)]
pub enum GdeltClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    format: &'a str,
}


/// Client bound to one caller's token
///
/// Built per call and dropped when the call returns; nothing is shared
/// between callers.
#[derive(Debug)]
pub struct GdeltCloudClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    health_timeout: Duration,
}

impl GdeltCloudClient {
    pub fn new(config: &GdeltClientConfig, token: impl Into<String>) -> Result<Self, GdeltClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.query_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            health_timeout: config.health_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        }
    }

    /// Run a statement against the store; failures come back as `QueryResult::error`
    pub async fn execute_query(&self, sql: &str) -> QueryResult {
        debug!(base_url = %self.base_url, sql = %sql, "Forwarding query");

        let request = self
            .client
            .post(format!("{}{}", self.base_url, QUERY_PATH))
            .json(&QueryBody {
                query: sql,
                format: QUERY_FORMAT,
            });

        let response = match self.authorize(request).send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(e),
        };

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("Store rejected credential");
            return QueryResult::failure(AUTH_REQUIRED_MESSAGE);
        }

        if status != reqwest::StatusCode::OK {
            let is_json = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.starts_with("application/json"));

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => return transport_failure(e),
            };

            warn!(status = status.as_u16(), "Query returned error status");
            return QueryResult::failure(status_error_message(status.as_u16(), is_json, &body));
        }

        match response.json::<Value>().await {
            Ok(body) => {
                let result = success_result(&body);
                debug!(count = result.count, "Query succeeded");
                result
            }
            Err(e) => transport_failure(e),
        }
    }

    pub async fn query_table(&self, table: QueryTable, request: &QueryRequest) -> QueryResult {
        self.execute_query(&request.to_sql(table)).await
    }

    pub async fn query_events(&self, request: &QueryRequest) -> QueryResult {
        self.query_table(QueryTable::Events, request).await
    }

    pub async fn query_gkg(&self, request: &QueryRequest) -> QueryResult {
        self.query_table(QueryTable::Gkg, request).await
    }

    /// `true` only when the store answers the probe with 200
    pub async fn health_check(&self) -> bool {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, HEALTH_PATH))
            .timeout(self.health_timeout);

        match self.authorize(request).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                debug!(error = %e, "Health probe failed");
                false
            }
        }
    }
}

/// Open a client for `token`, run one query on `table`, close it
pub async fn forward_query(
    config: &GdeltClientConfig,
    token: &str,
    table: QueryTable,
    request: &QueryRequest,
) -> QueryResult {
    match GdeltCloudClient::new(config, token) {
        Ok(client) => client.query_table(table, request).await,
        Err(e) => QueryResult::failure(format!("Query failed: {}", e)),
    }
}

/// Run the health probe with a short-lived client
pub async fn probe_health(config: &GdeltClientConfig, token: Option<&str>) -> bool {
    match GdeltCloudClient::new(config, token.unwrap_or_default()) {
        Ok(client) => client.health_check().await,
        Err(_) => false,
    }
}

fn transport_failure(err: reqwest::Error) -> QueryResult {
    if err.is_timeout() {
        warn!("Query timed out");
        QueryResult::failure(TIMEOUT_MESSAGE)
    } else {
        warn!(error = %err, "Query transport failure");
        QueryResult::failure(format!("Query failed: {}", err))
    }
}

/// Read a 200 body leniently: unusable fields fall back to their defaults
fn success_result(body: &Value) -> QueryResult {
    let data = body
        .get("data")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(|row| row.as_object().cloned()).collect())
        .unwrap_or_default();

    let count = body
        .get("count")
        .and_then(|count| {
            count
                .as_u64()
                .or_else(|| count.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .unwrap_or(0);

    let execution_time = body.get("executionTime").and_then(Value::as_f64);

    QueryResult::success(data, count, execution_time)
}

fn status_error_message(status: u16, is_json: bool, body: &str) -> String {
    let server_error = is_json
        .then(|| serde_json::from_str::<Value>(body).ok())
        .flatten()
        .and_then(|value| value.get("error").cloned())
        .map(|error| match error {
            Value::String(message) => message,
            other => other.to_string(),
        });

    server_error.unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "test-token";

    fn client_for(server: &MockServer) -> GdeltCloudClient {
        GdeltCloudClient::new(&GdeltClientConfig::new(server.uri()), TOKEN).unwrap()
    }

    #[tokio::test]
    async fn test_success_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/clickhouse/query"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"a": 1}], "count": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).execute_query("SELECT 1").await;

        assert_eq!(result.error, None);
        assert_eq!(result.count, 1);
        assert_eq!(result.data, vec![json!({"a": 1}).as_object().cloned().unwrap()]);
        assert_eq!(result.execution_time, None);
    }

    #[tokio::test]
    async fn test_success_with_execution_time_and_missing_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"executionTime": 0.42})))
            .mount(&server)
            .await;

        let result = client_for(&server).execute_query("SELECT 1").await;

        assert!(!result.is_error());
        assert!(result.data.is_empty());
        assert_eq!(result.count, 0);
        assert_eq!(result.execution_time, Some(0.42));
    }

    #[tokio::test]
    async fn test_request_shape() {
        let server = MockServer::start().await;
        let expected_sql = "SELECT * FROM gdelt_events WHERE day >= '2025-01-01' ORDER BY day DESC LIMIT 1000";

        Mock::given(method("POST"))
            .and(path("/api/clickhouse/query"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({"query": expected_sql, "format": "JSONEachRow"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "count": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let request = QueryRequest::new()
            .with_select("*")
            .with_where("day >= '2025-01-01'")
            .with_limit(5000);

        let result = client_for(&server).query_events(&request).await;
        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn test_gkg_uses_gkg_table() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(json!({
                "query": "SELECT * FROM gdelt_gkg ORDER BY date DESC LIMIT 1",
                "format": "JSONEachRow"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "count": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let request = QueryRequest::new().with_select("*").with_limit(0);
        let result = client_for(&server).query_gkg(&request).await;
        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad key"})))
            .mount(&server)
            .await;

        let result = client_for(&server).execute_query("SELECT 1").await;

        assert!(result.data.is_empty());
        assert_eq!(result.count, 0);
        assert_eq!(
            result.error.as_deref(),
            Some("Authentication required. Please provide valid OAuth token or API key.")
        );
    }

    #[tokio::test]
    async fn test_error_status_with_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Only SELECT queries are allowed"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).execute_query("DROP TABLE x").await;
        assert_eq!(result.error.as_deref(), Some("Only SELECT queries are allowed"));
        assert!(result.data.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_with_json_without_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "oops"})))
            .mount(&server)
            .await;

        let result = client_for(&server).execute_query("SELECT 1").await;
        assert_eq!(result.error.as_deref(), Some(r#"HTTP 500: {"message":"oops"}"#));
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let result = client_for(&server).execute_query("SELECT 1").await;
        assert_eq!(result.error.as_deref(), Some("HTTP 502: bad gateway"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": [], "count": 0}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = GdeltClientConfig::new(server.uri()).with_query_timeout(Duration::from_millis(50));
        let client = GdeltCloudClient::new(&config, TOKEN).unwrap();

        let result = client.execute_query("SELECT 1").await;

        assert!(result.data.is_empty());
        assert_eq!(result.count, 0);
        assert_eq!(
            result.error.as_deref(),
            Some("Query timeout. Try reducing query scope or adding more specific filters.")
        );
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let config = GdeltClientConfig::new("http://127.0.0.1:1");
        let client = GdeltCloudClient::new(&config, TOKEN).unwrap();

        let result = client.execute_query("SELECT 1").await;

        let error = result.error.unwrap();
        assert!(error.starts_with("Query failed: "), "unexpected error: {}", error);
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).execute_query("SELECT 1").await;
        assert!(result.error.unwrap().starts_with("Query failed: "));
    }

    #[tokio::test]
    async fn test_forward_query_opens_scoped_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer scoped"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"n": 2}], "count": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let result = forward_query(
            &GdeltClientConfig::new(server.uri()),
            "scoped",
            QueryTable::Events,
            &QueryRequest::new(),
        )
        .await;

        assert_eq!(result.count, 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(!client_for(&server).health_check().await);
        assert!(!probe_health(&GdeltClientConfig::new("http://127.0.0.1:1"), None).await);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = GdeltCloudClient::new(&GdeltClientConfig::new("https://example.com/"), TOKEN).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[tokio::test]
    async fn test_health_check_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = GdeltClientConfig::new(server.uri()).with_health_timeout(Duration::from_millis(50));
        let client = GdeltCloudClient::new(&config, TOKEN).unwrap();

        assert!(!client.health_check().await);
    }

    async fn result_for_body(body: serde_json::Value) -> QueryResult {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        client_for(&server).execute_query("SELECT 1").await
    }

    #[tokio::test]
    async fn test_null_count_keeps_rows() {
        let result = result_for_body(json!({"data": [{"a": 1}], "count": null})).await;

        assert_eq!(result.error, None);
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.count, 0);
    }

    #[tokio::test]
    async fn test_quoted_count_is_parsed() {
        let result = result_for_body(json!({"data": [{"a": 1}], "count": "1"})).await;

        assert_eq!(result.error, None);
        assert_eq!(result.count, 1);
        assert_eq!(result.data.len(), 1);
    }

    #[tokio::test]
    async fn test_null_data_is_empty() {
        let result = result_for_body(json!({"data": null, "count": 3})).await;

        assert_eq!(result.error, None);
        assert!(result.data.is_empty());
        assert_eq!(result.count, 3);
    }

    #[tokio::test]
    async fn test_non_numeric_execution_time_is_dropped() {
        let result =
            result_for_body(json!({"data": [{"a": 1}], "count": 1, "executionTime": "12ms"})).await;

        assert_eq!(result.error, None);
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.execution_time, None);
    }
}
