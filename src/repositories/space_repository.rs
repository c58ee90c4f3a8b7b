use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{
    facility,
    space::{
        ActiveModel as SpaceActiveModel, Column, Entity as Space, Model as SpaceModel, Relation,
    },
    space_type,
};
use crate::errors::ServiceError;
use crate::repositories::{Populate, Repository};

use super::BaseRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceRecord {
    pub space: SpaceModel,
    pub space_type: Option<space_type::Model>,
    pub facility: Option<facility::Model>,
}

impl SpaceRecord {
    pub fn type_name(&self) -> &str {
        self.space_type
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct SpaceRepository {
    base: BaseRepository,
}

impl SpaceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        populate: Populate,
    ) -> Result<Option<SpaceRecord>, ServiceError> {
        match Space::find_by_id(id).one(self.base.get_db()).await? {
            Some(space) => Ok(self.attach(vec![space], populate).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn find_all(&self, populate: Populate) -> Result<Vec<SpaceRecord>, ServiceError> {
        self.fetch(Space::find(), populate).await
    }

    pub async fn find_by_facility(
        &self,
        facility_id: &str,
        populate: Populate,
    ) -> Result<Vec<SpaceRecord>, ServiceError> {
        self.fetch(Space::find().filter(Column::FacilityId.eq(facility_id)), populate)
            .await
    }

    pub async fn find_by_type(
        &self,
        space_type_id: Uuid,
        populate: Populate,
    ) -> Result<Vec<SpaceRecord>, ServiceError> {
        self.fetch(Space::find().filter(Column::SpaceTypeId.eq(space_type_id)), populate)
            .await
    }

    pub async fn find_duplicate(
        &self,
        facility_id: &str,
        type_name: &str,
        description: &str,
    ) -> Result<Option<SpaceModel>, ServiceError> {
        Ok(Space::find()
            .join(JoinType::InnerJoin, Relation::SpaceType.def())
            .filter(space_type::Column::Name.eq(type_name))
            .filter(Column::FacilityId.eq(facility_id))
            .filter(Column::Description.eq(description))
            .one(self.base.get_db())
            .await?)
    }

    pub async fn count_by_type(&self, space_type_id: Uuid) -> Result<u64, ServiceError> {
        Ok(Space::find()
            .filter(Column::SpaceTypeId.eq(space_type_id))
            .count(self.base.get_db())
            .await?)
    }

    pub async fn insert(&self, model: SpaceModel) -> Result<SpaceModel, ServiceError> {
        let active = SpaceActiveModel {
            id: Set(model.id),
            facility_id: Set(model.facility_id),
            space_type_id: Set(model.space_type_id),
            description: Set(model.description),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        };
        Ok(active.insert(self.base.get_db()).await?)
    }

    pub async fn update(&self, changes: SpaceModel) -> Result<Option<SpaceModel>, ServiceError> {
        let Some(existing) = Space::find_by_id(changes.id)
            .one(self.base.get_db())
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: SpaceActiveModel = existing.into();
        active_model.facility_id = Set(changes.facility_id);
        active_model.space_type_id = Set(changes.space_type_id);
        active_model.description = Set(changes.description);

        Ok(Some(active_model.update(self.base.get_db()).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let result = Space::delete_by_id(id).exec(self.base.get_db()).await?;
        Ok(result.rows_affected)
    }

    async fn fetch(
        &self,
        select: Select<Space>,
        populate: Populate,
    ) -> Result<Vec<SpaceRecord>, ServiceError> {
        let spaces = select
            .order_by_asc(Column::CreatedAt)
            .all(self.base.get_db())
            .await?;
        self.attach(spaces, populate).await
    }

    async fn attach(
        &self,
        spaces: Vec<SpaceModel>,
        populate: Populate,
    ) -> Result<Vec<SpaceRecord>, ServiceError> {
        let db = self.base.get_db();
        let types = spaces.load_one(space_type::Entity, db).await?;
        let facilities = if populate.facility() {
            spaces.load_one(facility::Entity, db).await?
        } else {
            vec![None; spaces.len()]
        };

        Ok(spaces
            .into_iter()
            .zip(types)
            .zip(facilities)
            .map(|((space, space_type), facility)| SpaceRecord {
                space,
                space_type,
                facility,
            })
            .collect())
    }
}

impl Repository for SpaceRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
