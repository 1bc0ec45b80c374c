//! Storage layer
//!
//! TOML configuration file and API key lookup. The API key is never persisted.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
