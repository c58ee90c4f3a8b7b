use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, LoaderTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{
    facility,
    notification::{
        ActiveModel as NotificationActiveModel, Column, Entity as Notification,
        Model as NotificationModel, NotificationStatus,
    },
};
use crate::errors::ServiceError;
use crate::repositories::{Populate, Repository};

use super::BaseRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub notification: NotificationModel,
    pub facility: Option<facility::Model>,
}

impl From<NotificationModel> for NotificationRecord {
    fn from(notification: NotificationModel) -> Self {
        Self {
            notification,
            facility: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        populate: Populate,
    ) -> Result<Option<NotificationRecord>, ServiceError> {
        match Notification::find_by_id(id).one(self.base.get_db()).await? {
            Some(notification) => Ok(self.attach(vec![notification], populate).await?.pop()),
            None => Ok(None),
        }
    }

    /// Notifications of one facility, filtered by status as of `now`.
    ///
    /// Both comparisons are strict, so a notification ending exactly at `now`
    /// is neither active nor inactive.
    pub async fn find_by_facility(
        &self,
        facility_id: &str,
        status: NotificationStatus,
        now: DateTime<Utc>,
        populate: Populate,
    ) -> Result<Vec<NotificationRecord>, ServiceError> {
        let mut select = Notification::find().filter(Column::FacilityId.eq(facility_id));
        select = match status {
            NotificationStatus::All => select,
            NotificationStatus::Active => select.filter(
                Condition::any()
                    .add(Column::EndsOn.is_null())
                    .add(Column::EndsOn.gt(now)),
            ),
            NotificationStatus::Inactive => select.filter(Column::EndsOn.lt(now)),
        };

        let notifications = select
            .order_by_asc(Column::StartsOn)
            .all(self.base.get_db())
            .await?;
        self.attach(notifications, populate).await
    }

    pub async fn insert(&self, model: NotificationModel) -> Result<NotificationModel, ServiceError> {
        let active = NotificationActiveModel {
            id: Set(model.id),
            facility_id: Set(model.facility_id),
            title: Set(model.title),
            description: Set(model.description),
            starts_on: Set(model.starts_on),
            ends_on: Set(model.ends_on),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        };
        Ok(active.insert(self.base.get_db()).await?)
    }

    pub async fn update(
        &self,
        changes: NotificationModel,
    ) -> Result<Option<NotificationModel>, ServiceError> {
        let Some(existing) = Notification::find_by_id(changes.id)
            .one(self.base.get_db())
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: NotificationActiveModel = existing.into();
        active_model.facility_id = Set(changes.facility_id);
        active_model.title = Set(changes.title);
        active_model.description = Set(changes.description);
        active_model.starts_on = Set(changes.starts_on);
        active_model.ends_on = Set(changes.ends_on);

        Ok(Some(active_model.update(self.base.get_db()).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let result = Notification::delete_by_id(id)
            .exec(self.base.get_db())
            .await?;
        Ok(result.rows_affected)
    }

    async fn attach(
        &self,
        notifications: Vec<NotificationModel>,
        populate: Populate,
    ) -> Result<Vec<NotificationRecord>, ServiceError> {
        let facilities = if populate.facility() {
            notifications
                .load_one(facility::Entity, self.base.get_db())
                .await?
        } else {
            vec![None; notifications.len()]
        };

        Ok(notifications
            .into_iter()
            .zip(facilities)
            .map(|(notification, facility)| NotificationRecord {
                notification,
                facility,
            })
            .collect())
    }
}

impl Repository for NotificationRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
