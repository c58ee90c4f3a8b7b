use async_trait::async_trait;
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;

use crate::{
    db::DbPool, entities::facility, errors::ServiceError, repositories::FacilityRepository,
};

use super::FacilityLookup;

/// Read-only access to facilities. Codes are stored uppercase; lookups
/// normalize the caller's code the same way.
#[derive(Clone)]
pub struct FacilityService {
    facilities: FacilityRepository,
    logger: Logger,
}

impl FacilityService {
    pub fn new(db_pool: Arc<DbPool>, logger: Logger) -> Self {
        Self {
            facilities: FacilityRepository::new(db_pool),
            logger,
        }
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, code: &str) -> Result<bool, ServiceError> {
        self.facilities.exists(&code.to_uppercase()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, code: &str) -> Result<Option<facility::Model>, ServiceError> {
        self.facilities.find_by_code(&code.to_uppercase()).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<facility::Model>, ServiceError> {
        let facilities = self.facilities.find_all().await?;
        slog::debug!(self.logger, "Listed facilities"; "count" => facilities.len());
        Ok(facilities)
    }
}

#[async_trait]
impl FacilityLookup for FacilityService {
    async fn facility_exists(&self, code: &str) -> Result<bool, ServiceError> {
        self.exists(code).await
    }
}
