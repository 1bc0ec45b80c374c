//! Group relationships: user memberships and data source grants.
//!
//! Both names are resolved before the group's listing is consulted, member
//! first and group second. A name that does not resolve stops the operation
//! with [`ServiceError::EntityNotFound`] and nothing is written.

use super::resolver::NameResolver;
use super::types::{Outcome, ResourceKind, ServiceError};
use crate::api::models::{DataSource, DataSourceGrant, Group, MemberGrant, User};
use crate::api::transport::{ApiResponse, Transport};
use std::sync::Arc;

pub struct MembershipService<T: Transport> {
    resolver: NameResolver<T>,
}

impl<T: Transport> MembershipService<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            resolver: NameResolver::new(transport),
        }
    }

    pub async fn add_user_to_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<Outcome<User>, ServiceError> {
        let (user, group) = self.resolve_user_and_group(user_name, group_name).await?;

        if self.is_member(user.id, group.id).await? {
            log::debug!("User {} already in group {}", user_name, group_name);
            return Ok(Outcome::NotChanged);
        }

        let payload = serde_json::to_value(MemberGrant { user_id: user.id })?;
        let response = self
            .resolver
            .transport()
            .post(&format!("groups/{}/members", group.id), Some(payload))
            .await?;
        log::info!("Added user {} to group {}", user_name, group_name);
        Ok(Outcome::Applied(response.into_json()?))
    }

    pub async fn remove_user_from_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<Outcome<ApiResponse>, ServiceError> {
        let (user, group) = self.resolve_user_and_group(user_name, group_name).await?;

        if !self.is_member(user.id, group.id).await? {
            log::debug!("User {} not in group {}", user_name, group_name);
            return Ok(Outcome::NotFound);
        }

        let response = self
            .resolver
            .transport()
            .delete(&format!("groups/{}/members/{}", group.id, user.id))
            .await?;
        log::info!("Removed user {} from group {}", user_name, group_name);
        Ok(Outcome::Applied(response))
    }

    pub async fn add_data_source_to_group(
        &self,
        data_source_name: &str,
        group_name: &str,
    ) -> Result<Outcome<DataSource>, ServiceError> {
        let (data_source, group) = self
            .resolve_data_source_and_group(data_source_name, group_name)
            .await?;

        if self.is_granted(data_source.id, group.id).await? {
            log::debug!(
                "Data source {} already granted to group {}",
                data_source_name,
                group_name
            );
            return Ok(Outcome::NotChanged);
        }

        let payload = serde_json::to_value(DataSourceGrant {
            data_source_id: data_source.id,
        })?;
        let response = self
            .resolver
            .transport()
            .post(&format!("groups/{}/data_sources", group.id), Some(payload))
            .await?;
        log::info!(
            "Granted data source {} to group {}",
            data_source_name,
            group_name
        );
        Ok(Outcome::Applied(response.into_json()?))
    }

    pub async fn remove_data_source_from_group(
        &self,
        data_source_name: &str,
        group_name: &str,
    ) -> Result<Outcome<ApiResponse>, ServiceError> {
        let (data_source, group) = self
            .resolve_data_source_and_group(data_source_name, group_name)
            .await?;

        if !self.is_granted(data_source.id, group.id).await? {
            log::debug!(
                "Data source {} not granted to group {}",
                data_source_name,
                group_name
            );
            return Ok(Outcome::NotFound);
        }

        let response = self
            .resolver
            .transport()
            .delete(&format!(
                "groups/{}/data_sources/{}",
                group.id, data_source.id
            ))
            .await?;
        log::info!(
            "Revoked data source {} from group {}",
            data_source_name,
            group_name
        );
        Ok(Outcome::Applied(response))
    }

    async fn resolve_user_and_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<(User, Group), ServiceError> {
        let user = self
            .resolver
            .find_user_by_name(user_name)
            .await?
            .ok_or_else(|| not_found(ResourceKind::User, user_name))?;
        let group = self.require_group(group_name).await?;
        Ok((user, group))
    }

    async fn resolve_data_source_and_group(
        &self,
        data_source_name: &str,
        group_name: &str,
    ) -> Result<(DataSource, Group), ServiceError> {
        let data_source = self
            .resolver
            .find_data_source_by_name(data_source_name)
            .await?
            .ok_or_else(|| not_found(ResourceKind::DataSource, data_source_name))?;
        let group = self.require_group(group_name).await?;
        Ok((data_source, group))
    }

    async fn require_group(&self, group_name: &str) -> Result<Group, ServiceError> {
        self.resolver
            .find_group_by_name(group_name)
            .await?
            .ok_or_else(|| not_found(ResourceKind::Group, group_name))
    }

    async fn is_member(&self, user_id: i64, group_id: i64) -> Result<bool, ServiceError> {
        let members = self.resolver.list_group_members(group_id).await?;
        Ok(members.iter().any(|member| member.id == user_id))
    }

    async fn is_granted(&self, data_source_id: i64, group_id: i64) -> Result<bool, ServiceError> {
        let data_sources = self.resolver.list_group_data_sources(group_id).await?;
        Ok(data_sources.iter().any(|ds| ds.id == data_source_id))
    }
}

fn not_found(kind: ResourceKind, name: &str) -> ServiceError {
    ServiceError::EntityNotFound {
        kind,
        name: name.to_string(),
    }
}
