use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::{
    services,
    types::{SpaceTypeOutput, TypeInputObject},
};

#[derive(Default)]
pub struct SpaceTypeQuery;

#[Object]
impl SpaceTypeQuery {
    async fn space_type(&self, ctx: &Context<'_>, name: String) -> Result<Option<SpaceTypeOutput>> {
        let found = services(ctx)?
            .space_types
            .get(&name)
            .await
            .map_err(|e| e.extend())?;
        Ok(found.map(Into::into))
    }

    async fn all_space_types(&self, ctx: &Context<'_>) -> Result<Vec<SpaceTypeOutput>> {
        let all = services(ctx)?
            .space_types
            .get_all()
            .await
            .map_err(|e| e.extend())?;
        Ok(all.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct SpaceTypeMutation;

#[Object]
impl SpaceTypeMutation {
    async fn save_space_type(&self, ctx: &Context<'_>, input: TypeInputObject) -> Result<SpaceTypeOutput> {
        services(ctx)?
            .space_types
            .save(input.into())
            .await
            .map(Into::into)
            .map_err(|e| e.extend())
    }

    async fn update_space_type(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: TypeInputObject,
    ) -> Result<SpaceTypeOutput> {
        services(ctx)?
            .space_types
            .update(&id, input.into())
            .await
            .map(Into::into)
            .map_err(|e| e.extend())
    }

    async fn delete_space_type(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        services(ctx)?
            .space_types
            .delete(&id)
            .await
            .map_err(|e| e.extend())
    }
}
