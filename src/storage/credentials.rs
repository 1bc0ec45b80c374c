//! API key lookup
//!
//! The key is read from the REDASH_API_KEY environment variable and is never stored.

use std::env;

pub const API_KEY_VAR: &str = "REDASH_API_KEY";

/// Returns the value of REDASH_API_KEY if set and non-empty.
pub fn get_api_key() -> Option<String> {
    env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty())
}

pub fn has_api_key() -> bool {
    get_api_key().is_some()
}
