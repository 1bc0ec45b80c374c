use crate::error::ApiError;

/// Helper functions for standardizing error conversions across the codebase.
/// Convert reqwest errors to ApiError with request context
pub fn convert_request_error(
    error: reqwest::Error,
    method: &str,
    endpoint: &str,
    timeout_ms: Option<u64>,
) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout_ms.unwrap_or(0));
    }
    ApiError::Http {
        method: method.to_string(),
        endpoint: endpoint.to_string(),
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        message: error.to_string(),
    }
}

pub fn convert_timeout_error(endpoint: &str, timeout_ms: u64) -> ApiError {
    ApiError::Timeout {
        timeout_ms,
        endpoint: endpoint.to_string(),
    }
}

/// Convert JSON body errors to ApiError, keeping the status the service sent
pub fn convert_json_error(
    error: serde_json::Error,
    method: &str,
    endpoint: &str,
    status: u16,
) -> ApiError {
    ApiError::Http {
        method: method.to_string(),
        endpoint: endpoint.to_string(),
        status,
        message: format!("JSON parse error: {}", error),
    }
}

/// Classify a status outside the accepted set
pub fn convert_status_error(method: &str, endpoint: &str, status: u16, body: String) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status,
            server_message: body,
        },
        409 => ApiError::Conflict {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            message: body,
        },
        _ => ApiError::Http {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status,
            message: body,
        },
    }
}
