use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod facility_repository;
pub mod notification_repository;
pub mod operation_repository;
pub mod operation_type_repository;
pub mod space_repository;
pub mod space_type_repository;

pub use facility_repository::FacilityRepository;
pub use notification_repository::{NotificationRecord, NotificationRepository};
pub use operation_repository::{OperationRecord, OperationRepository};
pub use operation_type_repository::OperationTypeRepository;
pub use space_repository::{SpaceRecord, SpaceRepository};
pub use space_type_repository::SpaceTypeRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Which related documents to load alongside a facility-scoped record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Populate {
    #[default]
    None,
    Facility,
}

impl Populate {
    pub fn facility(self) -> bool {
        matches!(self, Populate::Facility)
    }
}
