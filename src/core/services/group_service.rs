use super::resolver::NameResolver;
use super::types::{Outcome, ResourceKind, ServiceError};
use crate::api::models::{DataSource, Group, NewGroup, User};
use crate::api::transport::{ApiResponse, Transport};
use std::sync::Arc;

pub struct GroupService<T: Transport> {
    resolver: NameResolver<T>,
}

impl<T: Transport> GroupService<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            resolver: NameResolver::new(transport),
        }
    }

    pub async fn list(&self) -> Result<Vec<Group>, ServiceError> {
        Ok(self.resolver.list_groups().await?)
    }

    pub async fn get(&self, name: &str) -> Result<Option<Group>, ServiceError> {
        Ok(self.resolver.find_group_by_name(name).await?)
    }

    /// Create a group unless one with this name is already listed.
    pub async fn create(&self, name: &str) -> Result<Outcome<Group>, ServiceError> {
        if self.resolver.find_group_by_name(name).await?.is_some() {
            log::debug!("Group {} already exists", name);
            return Ok(Outcome::AlreadyExists(name.to_string()));
        }

        let payload = serde_json::to_value(NewGroup { name })?;
        let response = self
            .resolver
            .transport()
            .post("groups", Some(payload))
            .await?;
        log::info!("Created group {}", name);
        Ok(Outcome::Applied(response.into_json()?))
    }

    pub async fn delete(&self, name: &str) -> Result<Outcome<ApiResponse>, ServiceError> {
        let Some(existing) = self.resolver.find_group_by_name(name).await? else {
            log::debug!("Group {} already absent", name);
            return Ok(Outcome::NotFound);
        };

        let response = self
            .resolver
            .transport()
            .delete(&format!("groups/{}", existing.id))
            .await?;
        log::info!("Deleted group {} ({})", name, existing.id);
        Ok(Outcome::Applied(response))
    }

    /// Members of the named group.
    pub async fn members(&self, name: &str) -> Result<Vec<User>, ServiceError> {
        let group = self.require(name).await?;
        Ok(self.resolver.list_group_members(group.id).await?)
    }

    /// Data sources granted to the named group.
    pub async fn data_sources(&self, name: &str) -> Result<Vec<DataSource>, ServiceError> {
        let group = self.require(name).await?;
        Ok(self.resolver.list_group_data_sources(group.id).await?)
    }

    async fn require(&self, name: &str) -> Result<Group, ServiceError> {
        self.resolver
            .find_group_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::EntityNotFound {
                kind: ResourceKind::Group,
                name: name.to_string(),
            })
    }
}
