use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::{
    services,
    types::{OperationTypeOutput, TypeInputObject},
};

#[derive(Default)]
pub struct OperationTypeQuery;

#[Object]
impl OperationTypeQuery {
    /// Exact-name lookup.
    async fn operation_type(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> Result<Option<OperationTypeOutput>> {
        let found = services(ctx)?
            .operation_types
            .get(&name)
            .await
            .map_err(|e| e.extend())?;
        Ok(found.map(Into::into))
    }

    async fn all_operation_types(&self, ctx: &Context<'_>) -> Result<Vec<OperationTypeOutput>> {
        let all = services(ctx)?
            .operation_types
            .get_all()
            .await
            .map_err(|e| e.extend())?;
        Ok(all.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct OperationTypeMutation;

#[Object]
impl OperationTypeMutation {
    async fn save_operation_type(
        &self,
        ctx: &Context<'_>,
        input: TypeInputObject,
    ) -> Result<OperationTypeOutput> {
        services(ctx)?
            .operation_types
            .save(input.into())
            .await
            .map(Into::into)
            .map_err(|e| e.extend())
    }

    async fn update_operation_type(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: TypeInputObject,
    ) -> Result<OperationTypeOutput> {
        services(ctx)?
            .operation_types
            .update(&id, input.into())
            .await
            .map(Into::into)
            .map_err(|e| e.extend())
    }

    async fn delete_operation_type(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        services(ctx)?
            .operation_types
            .delete(&id)
            .await
            .map_err(|e| e.extend())
    }
}
