use crate::api::transport::{ApiResponse, Query, Transport, object_or_empty};
use crate::error::ApiError;
use crate::utils::error_helpers::*;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "http://localhost:5000";
const USER_AGENT: &str = concat!("redash-admin/", env!("CARGO_PKG_VERSION"));

const OK: &[u16] = &[200];
const OK_OR_NO_CONTENT: &[u16] = &[200, 204];

/// HTTP transport for the Redash API.
///
/// No retries. No timeout unless one is configured.
#[derive(Debug, Clone)]
pub struct RedashClient {
    client: Client,
    pub base_url: String,
    api_key: String,
    timeout_ms: Option<u64>,
}

impl RedashClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, ApiError> {
        Self::build(base_url, api_key, None)
    }

    pub fn with_timeout(
        base_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Self::build(base_url, api_key, Some(timeout))
    }

    fn build(
        base_url: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| convert_request_error(e, "INIT", "client_init", None))?;

        Ok(RedashClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_ms: timeout.map(|t| t.as_millis() as u64),
        })
    }

    /// Path of a resource under the API root, e.g. `/api/groups/3`.
    pub fn endpoint(path: &str) -> String {
        format!("/api/{}", path.trim_start_matches('/'))
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, Self::endpoint(path));
        self.client
            .request(method, url)
            .header("Authorization", format!("Key {}", self.api_key))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
        accepted: &[u16],
    ) -> Result<ApiResponse, ApiError> {
        let endpoint = Self::endpoint(path);
        log::debug!("[{}] {}", method, endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, method.as_str(), &endpoint, self.timeout_ms))?;

        self.handle_response(response, method.as_str(), endpoint, accepted)
            .await
    }

    async fn handle_response(
        &self,
        response: Response,
        method: &str,
        endpoint: String,
        accepted: &[u16],
    ) -> Result<ApiResponse, ApiError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, method, &endpoint, self.timeout_ms))?;

        if !accepted.contains(&status) {
            log::debug!("[{}] {} rejected with {}", method, endpoint, status);
            return Err(convert_status_error(method, &endpoint, status, text));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| convert_json_error(e, method, &endpoint, status))?
        };

        Ok(ApiResponse::new(status, endpoint, body))
    }
}

#[async_trait]
impl Transport for RedashClient {
    async fn get(&self, path: &str, query: Query<'_>) -> Result<ApiResponse, ApiError> {
        let mut request = self.build_request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(Method::GET, path, request, OK).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        let request = self
            .build_request(Method::POST, path)
            .json(&object_or_empty(body));
        self.execute(Method::POST, path, request, OK).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        let request = self.build_request(Method::DELETE, path);
        self.execute(Method::DELETE, path, request, OK_OR_NO_CONTENT)
            .await
    }
}
