use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::{services, types::FacilityOutput};

#[derive(Default)]
pub struct FacilityQuery;

#[Object]
impl FacilityQuery {
    async fn facility(&self, ctx: &Context<'_>, id: ID) -> Result<Option<FacilityOutput>> {
        let facility = services(ctx)?
            .facilities
            .get(&id)
            .await
            .map_err(|e| e.extend())?;
        Ok(facility.map(Into::into))
    }

    async fn all_facilities(&self, ctx: &Context<'_>) -> Result<Vec<FacilityOutput>> {
        let facilities = services(ctx)?
            .facilities
            .get_all()
            .await
            .map_err(|e| e.extend())?;
        Ok(facilities.into_iter().map(Into::into).collect())
    }
}
