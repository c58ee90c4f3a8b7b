//! Output projections and input objects of the GraphQL schema.

use async_graphql::{Enum, InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};

use crate::entities::{
    facility,
    operation::{OperationalHours, WeeklyHours},
    operation_type, space_type,
};
use crate::repositories::{NotificationRecord, OperationRecord, SpaceRecord};
use crate::services::{NotificationInput, OperationInput, SpaceInput, TypeInput};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Facility")]
pub struct FacilityOutput {
    /// The facility code.
    pub id: ID,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<facility::Model> for FacilityOutput {
    fn from(model: facility::Model) -> Self {
        Self {
            id: ID(model.code),
            name: model.name,
            street: model.street,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            latitude: model.latitude,
            longitude: model.longitude,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "OperationType")]
pub struct OperationTypeOutput {
    pub id: ID,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<operation_type::Model> for OperationTypeOutput {
    fn from(model: operation_type::Model) -> Self {
        Self {
            id: ID(model.id.to_string()),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "SpaceType")]
pub struct SpaceTypeOutput {
    pub id: ID,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<space_type::Model> for SpaceTypeOutput {
    fn from(model: space_type::Model) -> Self {
        Self {
            id: ID(model.id.to_string()),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "OperationalHours")]
pub struct OperationalHoursOutput {
    pub day: String,
    pub open: String,
    pub close: String,
}

impl From<OperationalHours> for OperationalHoursOutput {
    fn from(hours: OperationalHours) -> Self {
        Self {
            day: hours.day,
            open: hours.open,
            close: hours.close,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Operation")]
pub struct OperationOutput {
    pub id: ID,
    pub facility_id: String,
    /// Name of the operation type.
    #[graphql(name = "type")]
    pub operation_type: String,
    pub description: String,
    pub poc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub room: Option<String>,
    pub operational_hours: Option<Vec<OperationalHoursOutput>>,
    pub facility: Option<FacilityOutput>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<OperationRecord> for OperationOutput {
    fn from(record: OperationRecord) -> Self {
        let operation_type = record.type_name().to_string();
        let operation = record.operation;
        Self {
            id: ID(operation.id.to_string()),
            facility_id: operation.facility_id,
            operation_type,
            description: operation.description,
            poc: operation.poc,
            email: operation.email,
            phone: operation.phone,
            url: operation.url,
            room: operation.room,
            operational_hours: operation
                .operational_hours
                .map(|WeeklyHours(hours)| hours.into_iter().map(Into::into).collect()),
            facility: record.facility.map(Into::into),
            created_at: operation.created_at,
            updated_at: operation.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Space")]
pub struct SpaceOutput {
    pub id: ID,
    pub facility_id: String,
    #[graphql(name = "type")]
    pub space_type: String,
    pub description: String,
    pub facility: Option<FacilityOutput>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SpaceRecord> for SpaceOutput {
    fn from(record: SpaceRecord) -> Self {
        let space_type = record.type_name().to_string();
        let space = record.space;
        Self {
            id: ID(space.id.to_string()),
            facility_id: space.facility_id,
            space_type,
            description: space.description,
            facility: record.facility.map(Into::into),
            created_at: space.created_at,
            updated_at: space.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Notification")]
pub struct NotificationOutput {
    pub id: ID,
    pub facility_id: String,
    pub title: String,
    pub description: String,
    pub starts_on: DateTime<Utc>,
    pub ends_on: Option<DateTime<Utc>>,
    /// Evaluated when the response is built.
    pub is_active: bool,
    pub facility: Option<FacilityOutput>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NotificationOutput {
    pub fn new(record: NotificationRecord, now: DateTime<Utc>) -> Self {
        let notification = record.notification;
        Self {
            id: ID(notification.id.to_string()),
            is_active: notification.is_active_at(now),
            facility_id: notification.facility_id,
            title: notification.title,
            description: notification.description,
            starts_on: notification.starts_on,
            ends_on: notification.ends_on,
            facility: record.facility.map(Into::into),
            created_at: notification.created_at,
            updated_at: notification.updated_at,
        }
    }
}

impl From<NotificationRecord> for NotificationOutput {
    fn from(record: NotificationRecord) -> Self {
        Self::new(record, Utc::now())
    }
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(
    name = "NotificationStatus",
    remote = "crate::entities::notification::NotificationStatus"
)]
pub enum NotificationStatusFilter {
    All,
    Active,
    Inactive,
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "TypeInput")]
pub struct TypeInputObject {
    pub name: String,
    pub description: Option<String>,
}

impl From<TypeInputObject> for TypeInput {
    fn from(input: TypeInputObject) -> Self {
        Self {
            name: input.name,
            description: input.description,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "OperationalHoursInput")]
pub struct OperationalHoursInput {
    pub day: String,
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "OperationInput")]
pub struct OperationInputObject {
    pub facility_id: String,
    #[graphql(name = "type")]
    pub operation_type: String,
    pub description: String,
    pub poc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub room: Option<String>,
    pub operational_hours: Option<Vec<OperationalHoursInput>>,
}

impl From<OperationInputObject> for OperationInput {
    fn from(input: OperationInputObject) -> Self {
        Self {
            facility_id: input.facility_id,
            operation_type: input.operation_type,
            description: input.description,
            poc: input.poc,
            email: input.email,
            phone: input.phone,
            url: input.url,
            room: input.room,
            operational_hours: input.operational_hours.map(|hours| {
                hours
                    .into_iter()
                    .map(|h| OperationalHours {
                        day: h.day,
                        open: h.open,
                        close: h.close,
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "SpaceInput")]
pub struct SpaceInputObject {
    pub facility_id: String,
    #[graphql(name = "type")]
    pub space_type: String,
    pub description: String,
}

impl From<SpaceInputObject> for SpaceInput {
    fn from(input: SpaceInputObject) -> Self {
        Self {
            facility_id: input.facility_id,
            space_type: input.space_type,
            description: input.description,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "NotificationInput")]
pub struct NotificationInputObject {
    pub facility_id: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` or an ISO 8601 timestamp.
    pub starts_on: String,
    pub ends_on: Option<String>,
}

impl From<NotificationInputObject> for NotificationInput {
    fn from(input: NotificationInputObject) -> Self {
        Self {
            facility_id: input.facility_id,
            title: input.title,
            description: input.description,
            starts_on: input.starts_on,
            ends_on: input.ends_on,
        }
    }
}
