use chrono::Utc;
use slog::Logger;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{
        operation::{self, OperationalHours, WeeklyHours},
        operation_type,
    },
    errors::ServiceError,
    repositories::{OperationRecord, OperationRepository, OperationTypeRepository, Populate},
    validators::{ensure_not_blank, validate_operational_hours},
};

use super::{parse_id, FacilityLookup};

const ENTITY: &str = "operation";
const TYPE_ENTITY: &str = "operation type";

/// Create/update payload for an operation. `operation_type` is the type name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationInput {
    pub facility_id: String,
    pub operation_type: String,
    pub description: String,
    pub poc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub room: Option<String>,
    pub operational_hours: Option<Vec<OperationalHours>>,
}

#[derive(Clone)]
pub struct OperationService {
    operations: OperationRepository,
    operation_types: OperationTypeRepository,
    facilities: Arc<dyn FacilityLookup>,
    logger: Logger,
}

impl OperationService {
    pub fn new(db_pool: Arc<DbPool>, facilities: Arc<dyn FacilityLookup>, logger: Logger) -> Self {
        Self {
            operations: OperationRepository::new(db_pool.clone()),
            operation_types: OperationTypeRepository::new(db_pool),
            facilities,
            logger,
        }
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        id: &str,
        populate: Populate,
    ) -> Result<Option<OperationRecord>, ServiceError> {
        self.operations.find_by_id(parse_id(id)?, populate).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, populate: Populate) -> Result<Vec<OperationRecord>, ServiceError> {
        self.operations.find_all(populate).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_facility(
        &self,
        facility_id: &str,
        populate: Populate,
    ) -> Result<Vec<OperationRecord>, ServiceError> {
        self.operations
            .find_by_facility(&facility_id.to_uppercase(), populate)
            .await
    }

    /// Operations tagged with the named type; empty when the type is unknown.
    #[instrument(skip(self))]
    pub async fn get_by_type(
        &self,
        type_name: &str,
        populate: Populate,
    ) -> Result<Vec<OperationRecord>, ServiceError> {
        match self
            .operation_types
            .find_by_name(&type_name.to_uppercase())
            .await?
        {
            Some(operation_type) => self.operations.find_by_type(operation_type.id, populate).await,
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self))]
    pub async fn save(&self, input: OperationInput) -> Result<OperationRecord, ServiceError> {
        let facility_id = input.facility_id.to_uppercase();
        let type_name = input.operation_type.to_uppercase();

        self.ensure_facility(&facility_id).await?;

        if self
            .operations
            .find_duplicate(&facility_id, &type_name, &input.description)
            .await?
            .is_some()
        {
            warn!(facility = %facility_id, type_name = %type_name, "Duplicate operation rejected");
            return Err(ServiceError::duplicate_entity(
                ENTITY,
                &input.description,
                &type_name,
                &facility_id,
            ));
        }

        let operation_type = self.resolve_type(&type_name).await?;
        let model = build_model(Uuid::new_v4(), facility_id, &operation_type, input);
        validate(&model)?;

        let created = self.operations.insert(model.clone()).await.map_err(|e| {
            if e.is_unique_violation() {
                ServiceError::duplicate_entity(
                    ENTITY,
                    &model.description,
                    &operation_type.name,
                    &model.facility_id,
                )
            } else {
                e
            }
        })?;

        info!(id = %created.id, facility = %created.facility_id, "Operation created");
        slog::info!(self.logger, "Operation created";
            "id" => %created.id, "facility" => &created.facility_id, "type" => &operation_type.name);

        Ok(OperationRecord {
            operation: created,
            operation_type: Some(operation_type),
            facility: None,
        })
    }

    /// Same checks as `save`, minus the duplicate lookup.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: &str,
        input: OperationInput,
    ) -> Result<OperationRecord, ServiceError> {
        let id = parse_id(id)?;
        let facility_id = input.facility_id.to_uppercase();
        let type_name = input.operation_type.to_uppercase();

        self.ensure_facility(&facility_id).await?;
        let operation_type = self.resolve_type(&type_name).await?;

        let candidate = build_model(id, facility_id, &operation_type, input);
        validate(&candidate)?;

        let (description, facility_id) = (candidate.description.clone(), candidate.facility_id.clone());
        let updated = self
            .operations
            .update(candidate)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    ServiceError::duplicate_entity(
                        ENTITY,
                        &description,
                        &operation_type.name,
                        &facility_id,
                    )
                } else {
                    e
                }
            })?
            .ok_or_else(|| ServiceError::not_found("update", ENTITY, id))?;

        slog::info!(self.logger, "Operation updated"; "id" => %updated.id);

        Ok(OperationRecord {
            operation: updated,
            operation_type: Some(operation_type),
            facility: None,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = parse_id(id)?;
        if self.operations.delete(id).await? == 0 {
            return Err(ServiceError::not_found("delete", ENTITY, id));
        }

        slog::info!(self.logger, "Operation deleted"; "id" => %id);
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

    async fn resolve_type(&self, type_name: &str) -> Result<operation_type::Model, ServiceError> {
        self.operation_types
            .find_by_name(type_name)
            .await?
            .ok_or_else(|| ServiceError::type_not_found(TYPE_ENTITY, type_name))
    }
}

fn build_model(
    id: Uuid,
    facility_id: String,
    operation_type: &operation_type::Model,
    input: OperationInput,
) -> operation::Model {
    operation::Model {
        id,
        facility_id,
        operation_type_id: operation_type.id,
        description: input.description,
        poc: input.poc,
        email: input.email,
        phone: input.phone,
        url: input.url,
        room: input.room,
        operational_hours: input.operational_hours.map(WeeklyHours),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn validate(model: &operation::Model) -> Result<(), ServiceError> {
    ensure_not_blank(model)?;
    if let Some(WeeklyHours(hours)) = &model.operational_hours {
        validate_operational_hours(hours)?;
    }
    Ok(())
}
