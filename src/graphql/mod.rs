//! GraphQL surface: one query and one mutation object per entity family,
//! merged into the schema roots.

use async_graphql::{Context, EmptySubscription, ErrorExtensions, MergedObject, Schema};

use crate::{entities::facility, repositories::Populate, services::AppServices};

pub mod facilities;
pub mod notifications;
pub mod operation_types;
pub mod operations;
pub mod space_types;
pub mod spaces;
pub mod types;

use facilities::FacilityQuery;
use notifications::{NotificationMutation, NotificationQuery};
use operation_types::{OperationTypeMutation, OperationTypeQuery};
use operations::{OperationMutation, OperationQuery};
use space_types::{SpaceTypeMutation, SpaceTypeQuery};
use spaces::{SpaceMutation, SpaceQuery};

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    FacilityQuery,
    OperationTypeQuery,
    SpaceTypeQuery,
    OperationQuery,
    SpaceQuery,
    NotificationQuery,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    OperationTypeMutation,
    SpaceTypeMutation,
    OperationMutation,
    SpaceMutation,
    NotificationMutation,
);

pub type FacilitiesSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Query limits applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct SchemaLimits {
    pub depth: usize,
    pub complexity: usize,
}

impl From<&crate::config::AppConfig> for SchemaLimits {
    fn from(cfg: &crate::config::AppConfig) -> Self {
        Self {
            depth: cfg.graphql_depth_limit,
            complexity: cfg.graphql_complexity_limit,
        }
    }
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            depth: 16,
            complexity: 2048,
        }
    }
}

pub fn build_schema(services: AppServices, limits: SchemaLimits) -> FacilitiesSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(services)
        .limit_depth(limits.depth)
        .limit_complexity(limits.complexity)
        .finish()
}

pub(crate) fn services<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppServices> {
    ctx.data::<AppServices>()
}

/// Join the facility only when the caller selected it.
pub(crate) fn populate(ctx: &Context<'_>) -> Populate {
    if ctx.look_ahead().field("facility").exists() {
        Populate::Facility
    } else {
        Populate::None
    }
}

/// Facility of a freshly written record, fetched only when selected.
pub(crate) async fn selected_facility(
    ctx: &Context<'_>,
    code: &str,
) -> async_graphql::Result<Option<facility::Model>> {
    if !populate(ctx).facility() {
        return Ok(None);
    }
    services(ctx)?
        .facilities
        .get(code)
        .await
        .map_err(|e| e.extend())
}
