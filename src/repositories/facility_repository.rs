use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::facility::{ActiveModel, Column, Entity as Facility, Model};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Read access to facilities, plus `insert` for provisioning.
#[derive(Debug, Clone)]
pub struct FacilityRepository {
    base: BaseRepository,
}

impl FacilityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Model>, ServiceError> {
        Ok(Facility::find_by_id(code.to_string())
            .one(self.base.get_db())
            .await?)
    }

    pub async fn exists(&self, code: &str) -> Result<bool, ServiceError> {
        let count = Facility::find()
            .filter(Column::Code.eq(code))
            .count(self.base.get_db())
            .await?;
        Ok(count > 0)
    }

    pub async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(Facility::find()
            .order_by_asc(Column::Code)
            .all(self.base.get_db())
            .await?)
    }

    pub async fn insert(&self, facility: Model) -> Result<Model, ServiceError> {
        let active = ActiveModel {
            code: Set(facility.code),
            name: Set(facility.name),
            street: Set(facility.street),
            city: Set(facility.city),
            state: Set(facility.state),
            postal_code: Set(facility.postal_code),
            latitude: Set(facility.latitude),
            longitude: Set(facility.longitude),
            created_at: Set(facility.created_at),
            updated_at: Set(facility.updated_at),
        };
        Ok(active.insert(self.base.get_db()).await?)
    }
}

impl Repository for FacilityRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
