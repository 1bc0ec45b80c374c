use crate::core::services::types::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ServiceError: {0}")]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("'{0}' already exists, nothing was written")]
    AlreadyExists(String),
}

/// Failures of a single HTTP exchange with the service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("[{method}] {endpoint} ({status}): {message}")]
    Http {
        method: String,
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("[{method}] {endpoint} ({status}): authentication failed")]
    Unauthorized {
        method: String,
        endpoint: String,
        status: u16,
        server_message: String,
    },
    /// The service rejected the write because of its own uniqueness constraint.
    #[error("[{method}] {endpoint} (409): {message}")]
    Conflict {
        method: String,
        endpoint: String,
        message: String,
    },
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64, endpoint: String },
}

impl ApiError {
    /// HTTP status carried by the error, 0 when the request never got a reply.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } | ApiError::Unauthorized { status, .. } => *status,
            ApiError::Conflict { .. } => 409,
            ApiError::Timeout { .. } => 0,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => api_severity(api_error),
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Service(service_error) => match service_error {
                ServiceError::Api(api_error) => api_severity(api_error),
                ServiceError::EntityNotFound { .. } => ErrorSeverity::Medium,
                ServiceError::Encode(_) => ErrorSeverity::Critical,
            },
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Cli(CliError::AuthRequired { hint, .. }) => Some(hint.clone()),
            AppError::Api(ApiError::Unauthorized { .. })
            | AppError::Service(ServiceError::Api(ApiError::Unauthorized { .. })) => Some(
                "Check REDASH_API_KEY; the key must belong to an admin user".to_string(),
            ),
            AppError::Api(ApiError::Timeout { .. })
            | AppError::Service(ServiceError::Api(ApiError::Timeout { .. })) => {
                Some("Check your connection to Redash or raise timeout_secs".to_string())
            }
            AppError::Service(ServiceError::EntityNotFound { kind, .. }) => Some(format!(
                "'redash-admin {} list' shows the available names",
                kind.command()
            )),
            AppError::Storage(StorageError::ConfigDirNotFound) => {
                Some("Pass --config-dir to choose a configuration directory".to_string())
            }
            _ => None,
        }
    }
}

fn api_severity(error: &ApiError) -> ErrorSeverity {
    match error {
        ApiError::Unauthorized { .. } => ErrorSeverity::High,
        ApiError::Timeout { .. } => ErrorSeverity::Medium,
        ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
        ApiError::Http { status: 0, .. } => ErrorSeverity::High,
        _ => ErrorSeverity::Medium,
    }
}
