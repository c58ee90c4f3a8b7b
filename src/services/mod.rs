use async_trait::async_trait;
use slog::Logger;
use std::sync::Arc;
use uuid::Uuid;

use crate::{db::DbPool, errors::ServiceError};

pub mod facilities;
pub mod notifications;
pub mod operation_types;
pub mod operations;
pub mod space_types;
pub mod spaces;

pub use facilities::FacilityService;
pub use notifications::{NotificationInput, NotificationService};
pub use operation_types::OperationTypeService;
pub use operations::{OperationInput, OperationService};
pub use space_types::SpaceTypeService;
pub use spaces::{SpaceInput, SpaceService};

/// Existence check against the facility registry.
///
/// Entity services only need to know that a facility code resolves, so they
/// depend on this seam rather than on the facility store directly.
#[async_trait]
pub trait FacilityLookup: Send + Sync {
    async fn facility_exists(&self, code: &str) -> Result<bool, ServiceError>;
}

/// Create/update payload shared by both type taxonomies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInput {
    pub name: String,
    pub description: Option<String>,
}

/// Parses a caller-supplied record id.
pub fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id.trim()).map_err(|_| ServiceError::InvalidIdFormat(id.to_string()))
}

/// Every service of the application, built once and shared by the resolvers.
#[derive(Clone)]
pub struct AppServices {
    pub facilities: Arc<FacilityService>,
    pub operation_types: Arc<OperationTypeService>,
    pub space_types: Arc<SpaceTypeService>,
    pub operations: Arc<OperationService>,
    pub spaces: Arc<SpaceService>,
    pub notifications: Arc<NotificationService>,
}

impl AppServices {
    /// Builds the container with the store-backed facility lookup.
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        let facilities = Arc::new(FacilityService::new(
            db_pool.clone(),
            logger.new(slog::o!("component" => "facility_service")),
        ));
        Self::assemble(db_pool, facilities.clone(), facilities, logger)
    }

    /// Builds the container with a caller-provided facility lookup.
    pub fn with_facility_lookup(
        db_pool: Arc<DbPool>,
        facility_lookup: Arc<dyn FacilityLookup>,
        logger: Logger,
    ) -> Self {
        let facilities = Arc::new(FacilityService::new(
            db_pool.clone(),
            logger.new(slog::o!("component" => "facility_service")),
        ));
        Self::assemble(db_pool, facilities, facility_lookup, logger)
    }

    fn assemble(
        db_pool: Arc<DbPool>,
        facilities: Arc<FacilityService>,
        facility_lookup: Arc<dyn FacilityLookup>,
        logger: Logger,
    ) -> Self {
        let operation_types_logger = logger.new(slog::o!("component" => "operation_type_service"));
        let space_types_logger = logger.new(slog::o!("component" => "space_type_service"));
        let operations_logger = logger.new(slog::o!("component" => "operation_service"));
        let spaces_logger = logger.new(slog::o!("component" => "space_service"));
        let notifications_logger = logger.new(slog::o!("component" => "notification_service"));

        Self {
            facilities,
            operation_types: Arc::new(OperationTypeService::new(
                db_pool.clone(),
                operation_types_logger,
            )),
            space_types: Arc::new(SpaceTypeService::new(db_pool.clone(), space_types_logger)),
            operations: Arc::new(OperationService::new(
                db_pool.clone(),
                facility_lookup.clone(),
                operations_logger,
            )),
            spaces: Arc::new(SpaceService::new(
                db_pool.clone(),
                facility_lookup.clone(),
                spaces_logger,
            )),
            notifications: Arc::new(NotificationService::new(
                db_pool,
                facility_lookup,
                notifications_logger,
            )),
        }
    }
}
