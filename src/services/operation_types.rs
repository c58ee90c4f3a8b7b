use chrono::Utc;
use slog::Logger;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::operation_type,
    errors::ServiceError,
    repositories::{OperationRepository, OperationTypeRepository},
    validators::ensure_not_blank,
};

use super::{parse_id, TypeInput};

const ENTITY: &str = "operation type";

/// Manages the operation type taxonomy.
#[derive(Clone)]
pub struct OperationTypeService {
    operation_types: OperationTypeRepository,
    operations: OperationRepository,
    logger: Logger,
}

impl OperationTypeService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self {
            operation_types: OperationTypeRepository::new(db_pool.clone()),
            operations: OperationRepository::new(db_pool),
            logger,
        }
    }

    /// Exact-name lookup; the name is not normalized.
    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<Option<operation_type::Model>, ServiceError> {
        self.operation_types.find_by_name(name).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<operation_type::Model>, ServiceError> {
        self.operation_types.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn save(&self, input: TypeInput) -> Result<operation_type::Model, ServiceError> {
        let name = input.name.to_uppercase();

        if self.operation_types.find_by_name(&name).await?.is_some() {
            warn!(name = %name, "Operation type already exists");
            return Err(ServiceError::already_exists(ENTITY, &name));
        }

        let model = operation_type::Model {
            id: Uuid::new_v4(),
            name,
            description: input.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        ensure_not_blank(&model)?;

        let name = model.name.clone();
        let created = self.operation_types.insert(model).await.map_err(|e| {
            if e.is_unique_violation() {
                ServiceError::already_exists(ENTITY, &name)
            } else {
                e
            }
        })?;

        info!(id = %created.id, name = %created.name, "Operation type created");
        slog::info!(self.logger, "Operation type created"; "id" => %created.id, "name" => &created.name);
        Ok(created)
    }

    /// Renames or redescribes a type. Operations reference the type by id,
    /// so they pick up the new name on their next read.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: &str,
        input: TypeInput,
    ) -> Result<operation_type::Model, ServiceError> {
        let id = parse_id(id)?;
        let candidate = operation_type::Model {
            id,
            name: input.name.to_uppercase(),
            description: input.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        ensure_not_blank(&candidate)?;

        let name = candidate.name.clone();
        let updated = self
            .operation_types
            .update(id, candidate.name, candidate.description)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    ServiceError::already_exists(ENTITY, &name)
                } else {
                    e
                }
            })?
            .ok_or_else(|| ServiceError::not_found("update", ENTITY, id))?;

        info!(id = %updated.id, "Operation type updated");
        slog::info!(self.logger, "Operation type updated"; "id" => %updated.id, "name" => &updated.name);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = parse_id(id)?;

        let references = self.operations.count_by_type(id).await?;
        if references > 0 {
            warn!(id = %id, references, "Operation type still in use");
            return Err(ServiceError::has_references(ENTITY, id, references, "operations"));
        }

        if self.operation_types.delete(id).await? == 0 {
            return Err(ServiceError::not_found("delete", ENTITY, id));
        }

        info!(id = %id, "Operation type deleted");
        slog::info!(self.logger, "Operation type deleted"; "id" => %id);
        Ok(true)
    }
}
