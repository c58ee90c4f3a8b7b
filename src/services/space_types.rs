use chrono::Utc;
use slog::Logger;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::space_type,
    errors::ServiceError,
    repositories::{SpaceRepository, SpaceTypeRepository},
    validators::ensure_not_blank,
};

use super::{parse_id, TypeInput};

const ENTITY: &str = "space type";

/// Manages the space type taxonomy.
#[derive(Clone)]
pub struct SpaceTypeService {
    space_types: SpaceTypeRepository,
    spaces: SpaceRepository,
    logger: Logger,
}

impl SpaceTypeService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self {
            space_types: SpaceTypeRepository::new(db_pool.clone()),
            spaces: SpaceRepository::new(db_pool),
            logger,
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<Option<space_type::Model>, ServiceError> {
        self.space_types.find_by_name(name).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<space_type::Model>, ServiceError> {
        self.space_types.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn save(&self, input: TypeInput) -> Result<space_type::Model, ServiceError> {
        let name = input.name.to_uppercase();

        if self.space_types.find_by_name(&name).await?.is_some() {
            warn!(name = %name, "Space type already exists");
            return Err(ServiceError::already_exists(ENTITY, &name));
        }

        let model = space_type::Model {
            id: Uuid::new_v4(),
            name,
            description: input.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        ensure_not_blank(&model)?;

        let name = model.name.clone();
        let created = self.space_types.insert(model).await.map_err(|e| {
            if e.is_unique_violation() {
                ServiceError::already_exists(ENTITY, &name)
            } else {
                e
            }
        })?;

        info!(id = %created.id, name = %created.name, "Space type created");
        slog::info!(self.logger, "Space type created"; "id" => %created.id, "name" => &created.name);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, input: TypeInput) -> Result<space_type::Model, ServiceError> {
        let id = parse_id(id)?;
        let candidate = space_type::Model {
            id,
            name: input.name.to_uppercase(),
            description: input.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        ensure_not_blank(&candidate)?;

        let name = candidate.name.clone();
        let updated = self
            .space_types
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

        slog::info!(self.logger, "Space type updated"; "id" => %updated.id, "name" => &updated.name);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = parse_id(id)?;

        let references = self.spaces.count_by_type(id).await?;
        if references > 0 {
            warn!(id = %id, references, "Space type still in use");
            return Err(ServiceError::has_references(ENTITY, id, references, "spaces"));
        }

        if self.space_types.delete(id).await? == 0 {
            return Err(ServiceError::not_found("delete", ENTITY, id));
        }

        slog::info!(self.logger, "Space type deleted"; "id" => %id);
        Ok(true)
    }
}
