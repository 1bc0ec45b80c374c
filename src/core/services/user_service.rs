use super::resolver::NameResolver;
use super::types::{Outcome, ServiceError, UserListParams};
use crate::api::models::{NewUser, User};
use crate::api::transport::{ApiResponse, Transport};
use std::sync::Arc;

pub struct UserService<T: Transport> {
    resolver: NameResolver<T>,
}

impl<T: Transport> UserService<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            resolver: NameResolver::new(transport),
        }
    }

    pub async fn list(&self, params: &UserListParams) -> Result<Vec<User>, ServiceError> {
        Ok(self.resolver.list_users(params).await?)
    }

    pub async fn get(&self, name: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.resolver.find_user_by_name(name).await?)
    }

    /// Invite a user. There is no pre-check: the service rejects duplicates.
    pub async fn create(&self, name: &str, email: &str) -> Result<Outcome<User>, ServiceError> {
        let payload = serde_json::to_value(NewUser { name, email })?;
        let response = self
            .resolver
            .transport()
            .post("users", Some(payload))
            .await?;
        log::info!("Created user {} <{}>", name, email);
        Ok(Outcome::Applied(response.into_json()?))
    }

    pub async fn delete(&self, name: &str) -> Result<Outcome<ApiResponse>, ServiceError> {
        let Some(existing) = self.resolver.find_user_by_name(name).await? else {
            log::debug!("User {} already absent", name);
            return Ok(Outcome::NotFound);
        };

        let response = self
            .resolver
            .transport()
            .delete(&format!("users/{}", existing.id))
            .await?;
        log::info!("Deleted user {} ({})", name, existing.id);
        Ok(Outcome::Applied(response))
    }
}
