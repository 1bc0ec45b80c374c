use crate::error::ApiError;
use serde_json::{Value, json};
use std::fmt;

/// Service layer error types
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A name given by the caller did not resolve; no mutation was attempted.
    #[error("{kind} {name} not found")]
    EntityNotFound { kind: ResourceKind, name: String },

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The kinds of resource the services resolve by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    DataSource,
    User,
    Group,
}

impl ResourceKind {
    /// CLI subcommand that manages this kind.
    pub fn command(&self) -> &'static str {
        match self {
            ResourceKind::DataSource => "data-source",
            ResourceKind::User => "user",
            ResourceKind::Group => "group",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::DataSource => "Data source",
            ResourceKind::User => "User",
            ResourceKind::Group => "Group",
        };
        f.write_str(label)
    }
}

/// Result of a reconciling operation.
///
/// Only `Applied` reflects a reply from the service. The other variants are
/// decided locally from the listings and never touched the network for the
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The service performed the mutating call.
    Applied(T),
    /// The desired relationship already holds.
    NotChanged,
    /// The target of a delete or removal was already absent.
    NotFound,
    /// A resource with this name already exists.
    AlreadyExists(String),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(&self) -> Option<&T> {
        match self {
            Outcome::Applied(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::NotChanged => Outcome::NotChanged,
            Outcome::NotFound => Outcome::NotFound,
            Outcome::AlreadyExists(name) => Outcome::AlreadyExists(name),
        }
    }

    /// Status code a locally decided outcome stands for; `None` for `Applied`.
    pub fn synthesized_status(&self) -> Option<u16> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::NotChanged => Some(200),
            Outcome::NotFound => Some(404),
            Outcome::AlreadyExists(_) => Some(409),
        }
    }

    /// Body a locally decided outcome stands for; `None` for `Applied`.
    pub fn synthesized_body(&self) -> Option<Value> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::NotChanged => Some(json!({"msg": "Not changed"})),
            Outcome::NotFound => Some(Value::Null),
            Outcome::AlreadyExists(name) => {
                Some(json!({"msg": format!("{} already exists", name)}))
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Applied(_) => "applied",
            Outcome::NotChanged => "not_changed",
            Outcome::NotFound => "not_found",
            Outcome::AlreadyExists(_) => "already_exists",
        }
    }
}

/// Parameters of the user listing
#[derive(Debug, Clone, PartialEq)]
pub struct UserListParams {
    pub page_size: u32,
    /// Also fetch users whose invitation is still pending.
    pub include_pending: bool,
    /// Forwarded verbatim as `order`; results are not re-sorted.
    pub sort_order: String,
}

impl Default for UserListParams {
    fn default() -> Self {
        Self {
            page_size: 250,
            include_pending: true,
            sort_order: "name".to_string(),
        }
    }
}
