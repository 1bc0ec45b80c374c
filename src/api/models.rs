use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder the service echoes in place of secret data source options.
pub const REDACTED_SECRET: &str = "--------";

/// Custom deserializer: group memberships arrive either as ids or as `{id, name}` objects
fn deserialize_group_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Number(n) => n.as_i64(),
            Value::Object(map) => map.get("id").and_then(Value::as_i64),
            _ => None,
        })
        .collect())
}

// Data source models
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DataSource {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Listings omit options; secrets come back as [`REDACTED_SECRET`].
    #[serde(default)]
    pub options: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct NewDataSource<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub name: &'a str,
    pub options: &'a Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct DataSourceUpdate<'a> {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub name: &'a str,
    pub options: &'a Map<String, Value>,
}

// User models
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(deserialize_with = "deserialize_group_ids", default)]
    pub groups: Vec<i64>,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_invitation_pending: bool,
}

/// Envelope of the paged user listing.
#[derive(Debug, Deserialize)]
pub struct UserPage {
    pub results: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

// Group models
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct NewGroup<'a> {
    pub name: &'a str,
}

// Relationship grants
#[derive(Debug, Serialize)]
pub struct MemberGrant {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct DataSourceGrant {
    pub data_source_id: i64,
}
