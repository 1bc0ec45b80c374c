//! Command-line input processing

use crate::error::CliError;
use serde_json::{Map, Value};

/// Parse repeated `key=value` arguments into a data source options map.
///
/// Values that read as JSON scalars (`5432`, `true`, `null`) keep their type;
/// anything else is taken as a string.
pub fn parse_options(pairs: &[String]) -> Result<Map<String, Value>, CliError> {
    let mut options = Map::new();
    for pair in pairs {
        let (key, raw) = pair.split_once('=').ok_or_else(|| {
            CliError::InvalidArguments(format!(
                "Invalid option format '{}'. Expected 'key=value'",
                pair
            ))
        })?;
        if key.is_empty() {
            return Err(CliError::InvalidArguments(format!(
                "Option '{}' has an empty key",
                pair
            )));
        }
        options.insert(key.to_string(), parse_scalar(raw));
    }
    Ok(options)
}

fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => value,
        _ => Value::String(raw.to_string()),
    }
}
