//! Name → record resolution by listing scan.
//!
//! Every lookup lists the resources afresh. The listing is the source of
//! truth and the services interleave lookups with creates and deletes, so
//! nothing is cached between calls.

use super::types::UserListParams;
use crate::api::models::{DataSource, Group, User, UserPage};
use crate::api::transport::Transport;
use crate::error::ApiError;
use std::sync::Arc;

pub struct NameResolver<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for NameResolver<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> NameResolver<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_data_sources(&self) -> Result<Vec<DataSource>, ApiError> {
        self.transport.get("data_sources", &[]).await?.into_json()
    }

    pub async fn find_data_source_by_name(
        &self,
        name: &str,
    ) -> Result<Option<DataSource>, ApiError> {
        let data_sources = self.list_data_sources().await?;
        Ok(data_sources.into_iter().find(|ds| ds.name == name))
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.transport.get("groups", &[]).await?.into_json()
    }

    pub async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>, ApiError> {
        let groups = self.list_groups().await?;
        Ok(groups.into_iter().find(|group| group.name == name))
    }

    /// Active users first, then pending ones when requested.
    pub async fn list_users(&self, params: &UserListParams) -> Result<Vec<User>, ApiError> {
        let mut users = self.list_user_page(false, params).await?;
        if params.include_pending {
            users.extend(self.list_user_page(true, params).await?);
        }
        Ok(users)
    }

    async fn list_user_page(
        &self,
        pending: bool,
        params: &UserListParams,
    ) -> Result<Vec<User>, ApiError> {
        let query = [
            ("pending", pending.to_string()),
            ("order", params.sort_order.clone()),
            ("page_size", params.page_size.to_string()),
        ];
        let page: UserPage = self.transport.get("users", &query).await?.into_json()?;
        Ok(page.results)
    }

    pub async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, ApiError> {
        let users = self.list_users(&UserListParams::default()).await?;
        Ok(users.into_iter().find(|user| user.name == name))
    }

    pub async fn list_group_members(&self, group_id: i64) -> Result<Vec<User>, ApiError> {
        self.transport
            .get(&format!("groups/{}/members", group_id), &[])
            .await?
            .into_json()
    }

    pub async fn list_group_data_sources(
        &self,
        group_id: i64,
    ) -> Result<Vec<DataSource>, ApiError> {
        self.transport
            .get(&format!("groups/{}/data_sources", group_id), &[])
            .await?
            .into_json()
    }
}
