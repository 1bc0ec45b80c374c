//! In-memory stand-in for the Redash admin API, driven through `Transport`.

use async_trait::async_trait;
use redash_admin::api::models::{DataSource, Group, REDACTED_SECRET, User};
use redash_admin::api::transport::{ApiResponse, Query, Transport, object_or_empty};
use redash_admin::error::ApiError;
use redash_admin::utils::error_helpers::convert_status_error;
use serde_json::{Map, Value, json};
use std::sync::Mutex;

const SECRET_KEYS: &[&str] = &["password", "secret", "token"];

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    data_sources: Vec<DataSource>,
    users: Vec<User>,
    groups: Vec<Group>,
    members: Vec<(i64, i64)>,
    grants: Vec<(i64, i64)>,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

struct Failure {
    method: &'static str,
    path: String,
    status: u16,
}

#[derive(Default)]
pub struct FakeRedash {
    state: Mutex<State>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<Failure>>,
}

type Reply = Result<(u16, Value), (u16, String)>;

impl FakeRedash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user the way an admin-created account would exist.
    pub fn seed_user(&self, name: &str, email: &str, pending: bool) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate_id();
        state.users.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            auth_type: Some("password".to_string()),
            groups: Vec::new(),
            is_disabled: false,
            is_invitation_pending: pending,
        });
        id
    }

    /// Every request to `method path` answers with `status` from now on.
    pub fn fail_with(&self, method: &'static str, path: &str, status: u16) {
        *self.failure.lock().unwrap() = Some(Failure {
            method,
            path: path.to_string(),
            status,
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method != "GET")
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn members_of(&self, group_id: i64) -> Vec<i64> {
        let state = self.state.lock().unwrap();
        state
            .members
            .iter()
            .filter(|(group, _)| *group == group_id)
            .map(|(_, user)| *user)
            .collect()
    }

    fn record(&self, method: &'static str, path: &str, query: Query<'_>, body: Option<Value>) {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            body,
        });
    }

    fn injected_failure(&self, method: &'static str, path: &str) -> Option<u16> {
        let failure = self.failure.lock().unwrap();
        failure
            .as_ref()
            .filter(|f| f.method == method && f.path == path)
            .map(|f| f.status)
    }

    fn respond(
        &self,
        method: &'static str,
        path: &str,
        reply: Reply,
        accepted: &[u16],
    ) -> Result<ApiResponse, ApiError> {
        let endpoint = format!("/api/{}", path);
        let (status, body) = match self.injected_failure(method, path) {
            Some(status) => (status, json!({"message": "injected failure"})),
            None => match reply {
                Ok(ok) => ok,
                Err((status, message)) => (status, json!({ "message": message })),
            },
        };
        if accepted.contains(&status) {
            Ok(ApiResponse::new(status, endpoint, body))
        } else {
            Err(convert_status_error(method, &endpoint, status, body.to_string()))
        }
    }

    fn route_get(&self, segments: &[&str], query: Query<'_>) -> Reply {
        let state = self.state.lock().unwrap();
        match segments {
            ["data_sources"] => Ok((
                200,
                Value::Array(state.data_sources.iter().map(listed).collect()),
            )),
            ["groups"] => Ok((200, json!(state.groups))),
            ["users"] => {
                let pending = query
                    .iter()
                    .any(|(key, value)| *key == "pending" && value == "true");
                let page_size = query
                    .iter()
                    .find(|(key, _)| *key == "page_size")
                    .and_then(|(_, value)| value.parse::<usize>().ok())
                    .unwrap_or(25);
                let mut users: Vec<&User> = state
                    .users
                    .iter()
                    .filter(|user| user.is_invitation_pending == pending)
                    .collect();
                if query.iter().any(|(key, value)| *key == "order" && value == "name") {
                    users.sort_by(|a, b| a.name.cmp(&b.name));
                }
                users.truncate(page_size);
                Ok((200, json!({ "results": users, "count": users.len() })))
            }
            ["groups", id, "members"] => {
                let group_id = group_id(&state, id)?;
                let members: Vec<&User> = state
                    .users
                    .iter()
                    .filter(|user| state.members.contains(&(group_id, user.id)))
                    .collect();
                Ok((200, json!(members)))
            }
            ["groups", id, "data_sources"] => {
                let group_id = group_id(&state, id)?;
                let granted: Vec<Value> = state
                    .data_sources
                    .iter()
                    .filter(|ds| state.grants.contains(&(group_id, ds.id)))
                    .map(|ds| {
                        let mut value = listed(ds);
                        value["view_only"] = json!(false);
                        value
                    })
                    .collect();
                Ok((200, Value::Array(granted)))
            }
            _ => Err((404, "no such route".to_string())),
        }
    }

    fn route_post(&self, segments: &[&str], body: &Value) -> Reply {
        let mut state = self.state.lock().unwrap();
        match segments {
            ["data_sources"] => {
                let name = text(body, "name");
                if state.data_sources.iter().any(|ds| ds.name == name) {
                    return Err((400, "Data source with this name already exists.".to_string()));
                }
                let id = state.allocate_id();
                let data_source = DataSource {
                    id,
                    kind: text(body, "type"),
                    name,
                    options: options(body),
                };
                let reply = redacted(&data_source);
                state.data_sources.push(data_source);
                Ok((200, reply))
            }
            ["data_sources", id] => {
                let id: i64 = id.parse().map_err(|_| (404, "bad id".to_string()))?;
                let data_source = state
                    .data_sources
                    .iter_mut()
                    .find(|ds| ds.id == id)
                    .ok_or((404, "data source not found".to_string()))?;
                data_source.kind = text(body, "type");
                data_source.name = text(body, "name");
                data_source.options = options(body);
                Ok((200, redacted(data_source)))
            }
            ["users"] => {
                let email = text(body, "email");
                if state.users.iter().any(|user| user.email == email) {
                    return Err((400, "Email already taken.".to_string()));
                }
                let id = state.allocate_id();
                let user = User {
                    id,
                    name: text(body, "name"),
                    email,
                    auth_type: Some("external".to_string()),
                    groups: Vec::new(),
                    is_disabled: false,
                    is_invitation_pending: true,
                };
                let reply = json!(user);
                state.users.push(user);
                Ok((200, reply))
            }
            ["groups"] => {
                let id = state.allocate_id();
                let group = Group {
                    id,
                    name: text(body, "name"),
                    kind: "regular".to_string(),
                };
                let reply = json!(group);
                state.groups.push(group);
                Ok((200, reply))
            }
            ["groups", id, "members"] => {
                let group_id = group_id(&state, id)?;
                let user_id = body["user_id"].as_i64().unwrap_or_default();
                let position = state
                    .users
                    .iter()
                    .position(|user| user.id == user_id)
                    .ok_or((404, "user not found".to_string()))?;
                if !state.members.contains(&(group_id, user_id)) {
                    state.members.push((group_id, user_id));
                    state.users[position].groups.push(group_id);
                }
                Ok((200, json!(state.users[position])))
            }
            ["groups", id, "data_sources"] => {
                let group_id = group_id(&state, id)?;
                let ds_id = body["data_source_id"].as_i64().unwrap_or_default();
                let reply = state
                    .data_sources
                    .iter()
                    .find(|ds| ds.id == ds_id)
                    .map(redacted)
                    .ok_or((404, "data source not found".to_string()))?;
                if !state.grants.contains(&(group_id, ds_id)) {
                    state.grants.push((group_id, ds_id));
                }
                Ok((200, reply))
            }
            _ => Err((404, "no such route".to_string())),
        }
    }

    fn route_delete(&self, segments: &[&str]) -> Reply {
        let mut state = self.state.lock().unwrap();
        match segments {
            ["data_sources", id] => {
                let id = parse_id(id)?;
                let before = state.data_sources.len();
                state.data_sources.retain(|ds| ds.id != id);
                if state.data_sources.len() == before {
                    return Err((404, "data source not found".to_string()));
                }
                state.grants.retain(|(_, ds)| *ds != id);
                Ok((204, Value::Null))
            }
            ["users", id] => {
                let id = parse_id(id)?;
                let before = state.users.len();
                state.users.retain(|user| user.id != id);
                if state.users.len() == before {
                    return Err((404, "user not found".to_string()));
                }
                state.members.retain(|(_, user)| *user != id);
                Ok((200, Value::Null))
            }
            ["groups", id] => {
                let id = group_id(&state, id)?;
                state.groups.retain(|group| group.id != id);
                state.members.retain(|(group, _)| *group != id);
                state.grants.retain(|(group, _)| *group != id);
                Ok((200, Value::Null))
            }
            ["groups", id, "members", user_id] => {
                let group_id = group_id(&state, id)?;
                let user_id = parse_id(user_id)?;
                state.members.retain(|pair| *pair != (group_id, user_id));
                for user in state.users.iter_mut().filter(|user| user.id == user_id) {
                    user.groups.retain(|group| *group != group_id);
                }
                Ok((200, Value::Null))
            }
            ["groups", id, "data_sources", ds_id] => {
                let group_id = group_id(&state, id)?;
                let ds_id = parse_id(ds_id)?;
                state.grants.retain(|pair| *pair != (group_id, ds_id));
                Ok((200, Value::Null))
            }
            _ => Err((404, "no such route".to_string())),
        }
    }
}

#[async_trait]
impl Transport for FakeRedash {
    async fn get(&self, path: &str, query: Query<'_>) -> Result<ApiResponse, ApiError> {
        self.record("GET", path, query, None);
        let segments: Vec<&str> = path.split('/').collect();
        let reply = self.route_get(&segments, query);
        self.respond("GET", path, reply, &[200])
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        let body = object_or_empty(body);
        self.record("POST", path, &[], Some(body.clone()));
        let segments: Vec<&str> = path.split('/').collect();
        let reply = self.route_post(&segments, &body);
        self.respond("POST", path, reply, &[200])
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.record("DELETE", path, &[], None);
        let segments: Vec<&str> = path.split('/').collect();
        let reply = self.route_delete(&segments);
        self.respond("DELETE", path, reply, &[200, 204])
    }
}

/// Listings carry no options, only the summary fields.
fn listed(data_source: &DataSource) -> Value {
    json!({
        "id": data_source.id,
        "name": data_source.name,
        "type": data_source.kind,
        "syntax": "sql",
        "paused": 0,
    })
}

fn redacted(data_source: &DataSource) -> Value {
    let mut value = json!(data_source);
    if let Some(options) = value["options"].as_object_mut() {
        for key in SECRET_KEYS {
            if let Some(secret) = options.get_mut(*key) {
                *secret = Value::String(REDACTED_SECRET.to_string());
            }
        }
    }
    value
}

fn text(body: &Value, key: &str) -> String {
    body[key].as_str().unwrap_or_default().to_string()
}

fn options(body: &Value) -> Map<String, Value> {
    body["options"].as_object().cloned().unwrap_or_default()
}

fn parse_id(raw: &str) -> Result<i64, (u16, String)> {
    raw.parse().map_err(|_| (404, format!("bad id {}", raw)))
}

fn group_id(state: &State, raw: &str) -> Result<i64, (u16, String)> {
    let id = parse_id(raw)?;
    if state.groups.iter().any(|group| group.id == id) {
        Ok(id)
    } else {
        Err((404, "group not found".to_string()))
    }
}
