//! # redash-admin
//!
//! Client library for the Redash administrative API.
//!
//! Callers work with names ("ensure data source `warehouse` exists", "ensure
//! `alice` is in `analysts`"); the service works with numeric ids. The
//! services in [`core::services`] resolve names by listing resources and then
//! issue at most one mutating call, returning an [`Outcome`] that says whether
//! the service changed anything.
//!
//! ```rust,ignore
//! use redash_admin::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> redash_admin::Result<()> {
//!     let client = Arc::new(RedashClient::new("http://localhost:5000".to_string(), "key".to_string())?);
//!     let groups = GroupService::new(client.clone());
//!     let members = MembershipService::new(client);
//!
//!     groups.create("analysts").await?;
//!     members.add_user_to_group("alice", "analysts").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │          Core Layer                 │  Name resolver, reconciling services
//! ├─────────────────────────────────────┤
//! │           API Layer                 │  Transport trait, reqwest client, models
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Config file, API key lookup
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Error conversion, logging, validation
//! └─────────────────────────────────────┘
//! ```

pub use crate::core::services::types::Outcome;
pub use error::AppError;

/// Commonly used types in one import.
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::{ApiError, AppError};

    pub use crate::api::client::RedashClient;
    pub use crate::api::models::{DataSource, Group, User};
    pub use crate::api::transport::{ApiResponse, Transport};

    pub use crate::core::services::data_source_service::DataSourceService;
    pub use crate::core::services::group_service::GroupService;
    pub use crate::core::services::membership_service::MembershipService;
    pub use crate::core::services::resolver::NameResolver;
    pub use crate::core::services::types::{
        Outcome, ResourceKind, ServiceError, UserListParams,
    };
    pub use crate::core::services::user_service::UserService;

    pub use crate::storage::config::Config;
    pub use crate::storage::credentials::get_api_key;
}

/// API layer - transport trait, HTTP client and wire models.
pub mod api;

/// Business logic layer - name resolution and reconciliation.
pub mod core;

/// Storage layer - configuration file and credential lookup.
pub mod storage;

/// Utilities shared across layers.
pub mod utils;

/// Hierarchical error system with severity and troubleshooting hints.
pub mod error;

/// Result alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
