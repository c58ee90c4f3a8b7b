use async_graphql::ErrorExtensions;
use sea_orm::error::{DbErr, SqlErr};

use crate::validators::{
    blank::BlankFieldsError,
    dates::{DateFormatError, DateOrderError},
    operational_hours::OperationalHoursError,
};

/// Error type shared by the repository and service layers.
///
/// Domain variants display as their bare message: that text is what crosses
/// the GraphQL boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    FacilityNotFound(String),

    #[error("{0}")]
    TypeNotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    DuplicateEntity(String),

    #[error("{0}")]
    HasReferences(String),

    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    DateFormat(#[from] DateFormatError),

    #[error(transparent)]
    DateOrder(#[from] DateOrderError),

    #[error("Invalid ID format: {0}")]
    InvalidIdFormat(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<BlankFieldsError> for ServiceError {
    fn from(err: BlankFieldsError) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<OperationalHoursError> for ServiceError {
    fn from(err: OperationalHoursError) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Upper-cases the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ServiceError {
    /// `Unable to {verb} {entity} {id}. {Entity} not found.`
    pub fn not_found(verb: &str, entity: &str, id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!(
            "Unable to {} {} {}. {} not found.",
            verb,
            entity,
            id,
            capitalize(entity)
        ))
    }

    pub fn facility_not_found(code: &str) -> Self {
        ServiceError::FacilityNotFound(format!("Facility {} not found.", code))
    }

    pub fn type_not_found(type_entity: &str, name: &str) -> Self {
        ServiceError::TypeNotFound(format!("{} {} not found.", capitalize(type_entity), name))
    }

    pub fn already_exists(type_entity: &str, name: &str) -> Self {
        ServiceError::AlreadyExists(format!(
            "{} {} already exists.",
            capitalize(type_entity),
            name
        ))
    }

    pub fn duplicate_entity(entity: &str, description: &str, type_name: &str, facility: &str) -> Self {
        ServiceError::DuplicateEntity(format!(
            "{} '{}' of type {} already exists for facility {}.",
            capitalize(entity),
            description,
            type_name,
            facility
        ))
    }

    pub fn has_references(type_entity: &str, id: impl std::fmt::Display, count: u64, dependents: &str) -> Self {
        ServiceError::HasReferences(format!(
            "Unable to delete {} {}. It is referenced by {} {}.",
            type_entity, id, count, dependents
        ))
    }

    /// True when the store rejected a write because of a unique index.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            ServiceError::DatabaseError(err)
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        )
    }

    /// Message suitable for API responses. Store failures return a generic
    /// message so connection details never leak to callers.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> async_graphql::Error {
        if let Self::DatabaseError(err) = self {
            tracing::error!(error = %err, "store operation failed");
        }
        async_graphql::Error::new(self.response_message())
    }
}
