use super::resolver::NameResolver;
use super::types::{Outcome, ServiceError};
use crate::api::models::{DataSource, DataSourceUpdate, NewDataSource};
use crate::api::transport::{ApiResponse, Transport};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Data source lifecycle keyed by name.
pub struct DataSourceService<T: Transport> {
    resolver: NameResolver<T>,
}

impl<T: Transport> DataSourceService<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            resolver: NameResolver::new(transport),
        }
    }

    pub async fn list(&self) -> Result<Vec<DataSource>, ServiceError> {
        Ok(self.resolver.list_data_sources().await?)
    }

    pub async fn get(&self, name: &str) -> Result<Option<DataSource>, ServiceError> {
        Ok(self.resolver.find_data_source_by_name(name).await?)
    }

    /// Create a data source unless one with this name is already listed.
    ///
    /// The check and the create are separate calls; a concurrent creator can
    /// slip in between, in which case the service's conflict is returned as
    /// an error.
    pub async fn create(
        &self,
        kind: &str,
        name: &str,
        options: &Map<String, Value>,
    ) -> Result<Outcome<DataSource>, ServiceError> {
        if self.resolver.find_data_source_by_name(name).await?.is_some() {
            log::debug!("Data source {} already exists", name);
            return Ok(Outcome::AlreadyExists(name.to_string()));
        }

        let payload = serde_json::to_value(NewDataSource {
            kind,
            name,
            options,
        })?;
        let response = self
            .resolver
            .transport()
            .post("data_sources", Some(payload))
            .await?;
        log::info!("Created data source {}", name);
        Ok(Outcome::Applied(response.into_json()?))
    }

    /// Update the named data source in place, or create it when absent.
    pub async fn create_or_update(
        &self,
        kind: &str,
        name: &str,
        options: &Map<String, Value>,
    ) -> Result<Outcome<DataSource>, ServiceError> {
        let existing = match self.resolver.find_data_source_by_name(name).await? {
            Some(existing) => existing,
            None => return self.create(kind, name, options).await,
        };

        let payload = serde_json::to_value(DataSourceUpdate {
            id: existing.id,
            kind,
            name,
            options,
        })?;
        let response = self
            .resolver
            .transport()
            .post(&format!("data_sources/{}", existing.id), Some(payload))
            .await?;
        log::info!("Updated data source {} ({})", name, existing.id);
        Ok(Outcome::Applied(response.into_json()?))
    }

    pub async fn delete(&self, name: &str) -> Result<Outcome<ApiResponse>, ServiceError> {
        let Some(existing) = self.resolver.find_data_source_by_name(name).await? else {
            log::debug!("Data source {} already absent", name);
            return Ok(Outcome::NotFound);
        };

        let response = self
            .resolver
            .transport()
            .delete(&format!("data_sources/{}", existing.id))
            .await?;
        log::info!("Deleted data source {} ({})", name, existing.id);
        Ok(Outcome::Applied(response))
    }
}
