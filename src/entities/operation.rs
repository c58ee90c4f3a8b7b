use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::Set, FromJsonQueryResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validators::StringFields;

/// Opening window for one day of the week. Embedded in an operation; has no
/// lifecycle of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalHours {
    pub day: String,
    pub open: String,
    pub close: String,
}

/// The weekly schedule, stored as a JSON column on the operation row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct WeeklyHours(pub Vec<OperationalHours>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub facility_id: String,
    pub operation_type_id: Uuid,
    pub description: String,
    pub poc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub room: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub operational_hours: Option<WeeklyHours>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facility::Entity",
        from = "Column::FacilityId",
        to = "super::facility::Column::Code"
    )]
    Facility,
    #[sea_orm(
        belongs_to = "super::operation_type::Entity",
        from = "Column::OperationTypeId",
        to = "super::operation_type::Column::Id"
    )]
    OperationType,
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facility.def()
    }
}

impl Related<super::operation_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OperationType.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if !insert {
            active_model.updated_at = Set(Some(Utc::now()));
        }
        Ok(active_model)
    }
}

impl StringFields for Model {
    fn string_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("description", Some(self.description.as_str())),
            ("poc", self.poc.as_deref()),
            ("email", self.email.as_deref()),
            ("phone", self.phone.as_deref()),
            ("url", self.url.as_deref()),
            ("room", self.room.as_deref()),
        ]
    }
}
