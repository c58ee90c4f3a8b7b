use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{
    facility,
    operation::{
        ActiveModel as OperationActiveModel, Column, Entity as Operation, Model as OperationModel,
        Relation,
    },
    operation_type,
};
use crate::errors::ServiceError;
use crate::repositories::{Populate, Repository};

use super::BaseRepository;

/// An operation with its type joined in and, on request, its facility.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    pub operation: OperationModel,
    pub operation_type: Option<operation_type::Model>,
    pub facility: Option<facility::Model>,
}

impl OperationRecord {
    /// Current name of the referenced type.
    pub fn type_name(&self) -> &str {
        self.operation_type
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct OperationRepository {
    base: BaseRepository,
}

impl OperationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        populate: Populate,
    ) -> Result<Option<OperationRecord>, ServiceError> {
        let found = Operation::find_by_id(id).one(self.base.get_db()).await?;
        match found {
            Some(operation) => Ok(self.attach(vec![operation], populate).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn find_all(&self, populate: Populate) -> Result<Vec<OperationRecord>, ServiceError> {
        self.fetch(Operation::find(), populate).await
    }

    pub async fn find_by_facility(
        &self,
        facility_id: &str,
        populate: Populate,
    ) -> Result<Vec<OperationRecord>, ServiceError> {
        self.fetch(
            Operation::find().filter(Column::FacilityId.eq(facility_id)),
            populate,
        )
        .await
    }

    pub async fn find_by_type(
        &self,
        operation_type_id: Uuid,
        populate: Populate,
    ) -> Result<Vec<OperationRecord>, ServiceError> {
        self.fetch(
            Operation::find().filter(Column::OperationTypeId.eq(operation_type_id)),
            populate,
        )
        .await
    }

    /// Looks for an operation with the same (facility, type name, description).
    pub async fn find_duplicate(
        &self,
        facility_id: &str,
        type_name: &str,
        description: &str,
    ) -> Result<Option<OperationModel>, ServiceError> {
        Ok(Operation::find()
            .join(JoinType::InnerJoin, Relation::OperationType.def())
            .filter(operation_type::Column::Name.eq(type_name))
            .filter(Column::FacilityId.eq(facility_id))
            .filter(Column::Description.eq(description))
            .one(self.base.get_db())
            .await?)
    }

    pub async fn count_by_type(&self, operation_type_id: Uuid) -> Result<u64, ServiceError> {
        Ok(Operation::find()
            .filter(Column::OperationTypeId.eq(operation_type_id))
            .count(self.base.get_db())
            .await?)
    }

    pub async fn insert(&self, model: OperationModel) -> Result<OperationModel, ServiceError> {
        let active = OperationActiveModel {
            id: Set(model.id),
            facility_id: Set(model.facility_id),
            operation_type_id: Set(model.operation_type_id),
            description: Set(model.description),
            poc: Set(model.poc),
            email: Set(model.email),
            phone: Set(model.phone),
            url: Set(model.url),
            room: Set(model.room),
            operational_hours: Set(model.operational_hours),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        };
        Ok(active.insert(self.base.get_db()).await?)
    }

    /// Replaces the mutable fields of the operation with `changes.id`.
    /// `created_at` is kept from the stored row. Returns `None` when no such
    /// operation exists.
    pub async fn update(
        &self,
        changes: OperationModel,
    ) -> Result<Option<OperationModel>, ServiceError> {
        let Some(existing) = Operation::find_by_id(changes.id)
            .one(self.base.get_db())
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: OperationActiveModel = existing.into();
        active_model.facility_id = Set(changes.facility_id);
        active_model.operation_type_id = Set(changes.operation_type_id);
        active_model.description = Set(changes.description);
        active_model.poc = Set(changes.poc);
        active_model.email = Set(changes.email);
        active_model.phone = Set(changes.phone);
        active_model.url = Set(changes.url);
        active_model.room = Set(changes.room);
        active_model.operational_hours = Set(changes.operational_hours);

        Ok(Some(active_model.update(self.base.get_db()).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let result = Operation::delete_by_id(id).exec(self.base.get_db()).await?;
        Ok(result.rows_affected)
    }

    async fn fetch(
        &self,
        select: Select<Operation>,
        populate: Populate,
    ) -> Result<Vec<OperationRecord>, ServiceError> {
        let operations = select
            .order_by_asc(Column::CreatedAt)
            .all(self.base.get_db())
            .await?;
        self.attach(operations, populate).await
    }

    async fn attach(
        &self,
        operations: Vec<OperationModel>,
        populate: Populate,
    ) -> Result<Vec<OperationRecord>, ServiceError> {
        let db = self.base.get_db();
        let types = operations.load_one(operation_type::Entity, db).await?;
        let facilities = if populate.facility() {
            operations.load_one(facility::Entity, db).await?
        } else {
            vec![None; operations.len()]
        };

        Ok(operations
            .into_iter()
            .zip(types)
            .zip(facilities)
            .map(|((operation, operation_type), facility)| OperationRecord {
                operation,
                operation_type,
                facility,
            })
            .collect())
    }
}

impl Repository for OperationRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
