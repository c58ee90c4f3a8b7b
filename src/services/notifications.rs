use chrono::Utc;
use slog::Logger;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::notification::{self, NotificationStatus},
    errors::ServiceError,
    repositories::{NotificationRecord, NotificationRepository, Populate},
    validators::{check_notification_window, ensure_not_blank, parse_date},
};

use super::{parse_id, FacilityLookup};

const ENTITY: &str = "notification";

/// Create/update payload. Dates arrive as caller-supplied strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationInput {
    pub facility_id: String,
    pub title: String,
    pub description: String,
    pub starts_on: String,
    pub ends_on: Option<String>,
}

#[derive(Clone)]
pub struct NotificationService {
    notifications: NotificationRepository,
    facilities: Arc<dyn FacilityLookup>,
    logger: Logger,
}

impl NotificationService {
    pub fn new(db_pool: Arc<DbPool>, facilities: Arc<dyn FacilityLookup>, logger: Logger) -> Self {
        Self {
            notifications: NotificationRepository::new(db_pool),
            facilities,
            logger,
        }
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        id: &str,
        populate: Populate,
    ) -> Result<Option<NotificationRecord>, ServiceError> {
        self.notifications.find_by_id(parse_id(id)?, populate).await
    }

    /// Status is evaluated against the clock at query time.
    #[instrument(skip(self))]
    pub async fn get_by_facility(
        &self,
        facility_id: &str,
        status: NotificationStatus,
        populate: Populate,
    ) -> Result<Vec<NotificationRecord>, ServiceError> {
        self.notifications
            .find_by_facility(&facility_id.to_uppercase(), status, Utc::now(), populate)
            .await
    }

    #[instrument(skip(self))]
    pub async fn save(&self, input: NotificationInput) -> Result<notification::Model, ServiceError> {
        let model = self.prepare(Uuid::new_v4(), input).await?;
        let created = self.notifications.insert(model).await?;

        info!(id = %created.id, facility = %created.facility_id, "Notification created");
        slog::info!(self.logger, "Notification created";
            "id" => %created.id, "facility" => &created.facility_id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: &str,
        input: NotificationInput,
    ) -> Result<notification::Model, ServiceError> {
        let id = parse_id(id)?;
        let candidate = self.prepare(id, input).await?;

        let updated = self
            .notifications
            .update(candidate)
            .await?
            .ok_or_else(|| ServiceError::not_found("update", ENTITY, id))?;

        slog::info!(self.logger, "Notification updated"; "id" => %updated.id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = parse_id(id)?;
        if self.notifications.delete(id).await? == 0 {
            return Err(ServiceError::not_found("delete", ENTITY, id));
        }

        slog::info!(self.logger, "Notification deleted"; "id" => %id);
        Ok(true)
    }

    /// Facility check, date parsing, window ordering, then blank fields.
    async fn prepare(
        &self,
        id: Uuid,
        input: NotificationInput,
    ) -> Result<notification::Model, ServiceError> {
        let facility_id = input.facility_id.to_uppercase();
        if !self.facilities.facility_exists(&facility_id).await? {
            warn!(facility = %facility_id, "Unknown facility");
            return Err(ServiceError::facility_not_found(&facility_id));
        }

        let starts_on = parse_date("startsOn", &input.starts_on)?;
        let ends_on = input
            .ends_on
            .as_deref()
            .map(|value| parse_date("endsOn", value))
            .transpose()?;

        let now = Utc::now();
        if let Err(e) = check_notification_window(starts_on, ends_on, now) {
            warn!(error = %e, "Notification window rejected");
            return Err(e.into());
        }

        let model = notification::Model {
            id,
            facility_id,
            title: input.title,
            description: input.description,
            starts_on,
            ends_on,
            created_at: now,
            updated_at: None,
        };
        ensure_not_blank(&model)?;

        Ok(model)
    }
}
