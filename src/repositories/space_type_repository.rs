use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::space_type::{
    ActiveModel as SpaceTypeActiveModel, Column, Entity as SpaceType, Model as SpaceTypeModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

#[derive(Debug, Clone)]
pub struct SpaceTypeRepository {
    base: BaseRepository,
}

impl SpaceTypeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SpaceTypeModel>, ServiceError> {
        Ok(SpaceType::find_by_id(id).one(self.base.get_db()).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<SpaceTypeModel>, ServiceError> {
        Ok(SpaceType::find()
            .filter(Column::Name.eq(name))
            .one(self.base.get_db())
            .await?)
    }

    pub async fn find_all(&self) -> Result<Vec<SpaceTypeModel>, ServiceError> {
        Ok(SpaceType::find()
            .order_by_asc(Column::CreatedAt)
            .all(self.base.get_db())
            .await?)
    }

    pub async fn insert(&self, model: SpaceTypeModel) -> Result<SpaceTypeModel, ServiceError> {
        let active = SpaceTypeActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            description: Set(model.description),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        };
        Ok(active.insert(self.base.get_db()).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        description: Option<String>,
    ) -> Result<Option<SpaceTypeModel>, ServiceError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: SpaceTypeActiveModel = existing.into();
        active_model.name = Set(name);
        active_model.description = Set(description);

        Ok(Some(active_model.update(self.base.get_db()).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let result = SpaceType::delete_by_id(id).exec(self.base.get_db()).await?;
        Ok(result.rows_affected)
    }
}

impl Repository for SpaceTypeRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
