use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::operation_type::{
    ActiveModel as OperationTypeActiveModel, Column, Entity as OperationType,
    Model as OperationTypeModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

#[derive(Debug, Clone)]
pub struct OperationTypeRepository {
    base: BaseRepository,
}

impl OperationTypeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OperationTypeModel>, ServiceError> {
        Ok(OperationType::find_by_id(id)
            .one(self.base.get_db())
            .await?)
    }

    /// Exact match; callers decide on casing.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<OperationTypeModel>, ServiceError> {
        Ok(OperationType::find()
            .filter(Column::Name.eq(name))
            .one(self.base.get_db())
            .await?)
    }

    pub async fn find_all(&self) -> Result<Vec<OperationTypeModel>, ServiceError> {
        Ok(OperationType::find()
            .order_by_asc(Column::CreatedAt)
            .all(self.base.get_db())
            .await?)
    }

    pub async fn insert(&self, model: OperationTypeModel) -> Result<OperationTypeModel, ServiceError> {
        let active = OperationTypeActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            description: Set(model.description),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        };
        Ok(active.insert(self.base.get_db()).await?)
    }

    /// Returns `None` when no type has this id.
    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        description: Option<String>,
    ) -> Result<Option<OperationTypeModel>, ServiceError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: OperationTypeActiveModel = existing.into();
        active_model.name = Set(name);
        active_model.description = Set(description);

        Ok(Some(active_model.update(self.base.get_db()).await?))
    }

    /// Number of rows removed.
    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let result = OperationType::delete_by_id(id)
            .exec(self.base.get_db())
            .await?;
        Ok(result.rows_affected)
    }
}

impl Repository for OperationTypeRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
