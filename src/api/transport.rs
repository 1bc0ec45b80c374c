//! Transport seam between the reconciling services and the HTTP layer.

use crate::error::ApiError;
use crate::utils::error_helpers::convert_json_error;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Query string pairs forwarded verbatim to the service.
pub type Query<'a> = &'a [(&'a str, String)];

/// A successful reply from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub endpoint: String,
    /// Decoded JSON body, `Value::Null` when the service sent none.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            status,
            endpoint: endpoint.into(),
            body,
        }
    }

    /// Decode the body into a model type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        decode(self.body.clone(), self.status, &self.endpoint)
    }

    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        decode(self.body, self.status, &self.endpoint)
    }
}

fn decode<T: DeserializeOwned>(body: Value, status: u16, endpoint: &str) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| convert_json_error(e, "DECODE", endpoint, status))
}

/// Paths are relative to the API root, e.g. `groups/3/members`.
///
/// `get` and `post` succeed only on 200; `delete` succeeds on 200 or 204.
/// Every other status is an [`ApiError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: Query<'_>) -> Result<ApiResponse, ApiError>;

    /// A body that is absent or not a JSON object is sent as `{}`.
    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError>;

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError>;
}

/// Normalize a POST body: only JSON objects go over the wire as-is.
pub fn object_or_empty(body: Option<Value>) -> Value {
    match body {
        Some(value @ Value::Object(_)) => value,
        _ => Value::Object(serde_json::Map::new()),
    }
}
