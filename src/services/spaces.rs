use chrono::Utc;
use slog::Logger;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{space, space_type},
    errors::ServiceError,
    repositories::{Populate, SpaceRecord, SpaceRepository, SpaceTypeRepository},
    validators::ensure_not_blank,
};

use super::{parse_id, FacilityLookup};

const ENTITY: &str = "space";
const TYPE_ENTITY: &str = "space type";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceInput {
    pub facility_id: String,
    pub space_type: String,
    pub description: String,
}

#[derive(Clone)]
pub struct SpaceService {
    spaces: SpaceRepository,
    space_types: SpaceTypeRepository,
    facilities: Arc<dyn FacilityLookup>,
    logger: Logger,
}

impl SpaceService {
    pub fn new(db_pool: Arc<DbPool>, facilities: Arc<dyn FacilityLookup>, logger: Logger) -> Self {
        Self {
            spaces: SpaceRepository::new(db_pool.clone()),
            space_types: SpaceTypeRepository::new(db_pool),
            facilities,
            logger,
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str, populate: Populate) -> Result<Option<SpaceRecord>, ServiceError> {
        self.spaces.find_by_id(parse_id(id)?, populate).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, populate: Populate) -> Result<Vec<SpaceRecord>, ServiceError> {
        self.spaces.find_all(populate).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_facility(
        &self,
        facility_id: &str,
        populate: Populate,
    ) -> Result<Vec<SpaceRecord>, ServiceError> {
        self.spaces
            .find_by_facility(&facility_id.to_uppercase(), populate)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_type(
        &self,
        type_name: &str,
        populate: Populate,
    ) -> Result<Vec<SpaceRecord>, ServiceError> {
        match self.space_types.find_by_name(&type_name.to_uppercase()).await? {
            Some(space_type) => self.spaces.find_by_type(space_type.id, populate).await,
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self))]
    pub async fn save(&self, input: SpaceInput) -> Result<SpaceRecord, ServiceError> {
        let facility_id = input.facility_id.to_uppercase();
        let type_name = input.space_type.to_uppercase();

        self.ensure_facility(&facility_id).await?;

        if self
            .spaces
            .find_duplicate(&facility_id, &type_name, &input.description)
            .await?
            .is_some()
        {
            warn!(facility = %facility_id, type_name = %type_name, "Duplicate space rejected");
            return Err(ServiceError::duplicate_entity(
                ENTITY,
                &input.description,
                &type_name,
                &facility_id,
            ));
        }

        let space_type = self.resolve_type(&type_name).await?;
        let model = space::Model {
            id: Uuid::new_v4(),
            facility_id,
            space_type_id: space_type.id,
            description: input.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        ensure_not_blank(&model)?;

        let created = self.spaces.insert(model.clone()).await.map_err(|e| {
            if e.is_unique_violation() {
                ServiceError::duplicate_entity(
                    ENTITY,
                    &model.description,
                    &space_type.name,
                    &model.facility_id,
                )
            } else {
                e
            }
        })?;

        info!(id = %created.id, facility = %created.facility_id, "Space created");
        slog::info!(self.logger, "Space created";
            "id" => %created.id, "facility" => &created.facility_id, "type" => &space_type.name);

        Ok(SpaceRecord {
            space: created,
            space_type: Some(space_type),
            facility: None,
        })
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, input: SpaceInput) -> Result<SpaceRecord, ServiceError> {
        let id = parse_id(id)?;
        let facility_id = input.facility_id.to_uppercase();
        let type_name = input.space_type.to_uppercase();

        self.ensure_facility(&facility_id).await?;
        let space_type = self.resolve_type(&type_name).await?;

        let candidate = space::Model {
            id,
            facility_id,
            space_type_id: space_type.id,
            description: input.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        ensure_not_blank(&candidate)?;

        let (description, facility_id) = (candidate.description.clone(), candidate.facility_id.clone());
        let updated = self
            .spaces
            .update(candidate)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    ServiceError::duplicate_entity(ENTITY, &description, &space_type.name, &facility_id)
                } else {
                    e
                }
            })?
            .ok_or_else(|| ServiceError::not_found("update", ENTITY, id))?;

        slog::info!(self.logger, "Space updated"; "id" => %updated.id);

        Ok(SpaceRecord {
            space: updated,
            space_type: Some(space_type),
            facility: None,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = parse_id(id)?;
        if self.spaces.delete(id).await? == 0 {
            return Err(ServiceError::not_found("delete", ENTITY, id));
        }

        slog::info!(self.logger, "Space deleted"; "id" => %id);
        Ok(true)
    }

    async fn ensure_facility(&self, facility_id: &str) -> Result<(), ServiceError> {
        if self.facilities.facility_exists(facility_id).await? {
            Ok(())
        } else {
            warn!(facility = %facility_id, "Unknown facility");
            Err(ServiceError::facility_not_found(facility_id))
        }
    }

    async fn resolve_type(&self, type_name: &str) -> Result<space_type::Model, ServiceError> {
        self.space_types
            .find_by_name(type_name)
            .await?
            .ok_or_else(|| ServiceError::type_not_found(TYPE_ENTITY, type_name))
    }
}
