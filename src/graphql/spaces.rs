use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::{
    populate, selected_facility, services,
    types::{SpaceInputObject, SpaceOutput},
};

#[derive(Default)]
pub struct SpaceQuery;

#[Object]
impl SpaceQuery {
    async fn space(&self, ctx: &Context<'_>, id: ID) -> Result<Option<SpaceOutput>> {
        let record = services(ctx)?
            .spaces
            .get(&id, populate(ctx))
            .await
            .map_err(|e| e.extend())?;
        Ok(record.map(Into::into))
    }

    async fn all_spaces(
        &self,
        ctx: &Context<'_>,
        facility_id: Option<String>,
        #[graphql(name = "type")] type_name: Option<String>,
    ) -> Result<Vec<SpaceOutput>> {
        let spaces = &services(ctx)?.spaces;
        let populate = populate(ctx);

        let records = match (facility_id, type_name) {
            (Some(facility_id), type_name) => {
                let records = spaces
                    .get_by_facility(&facility_id, populate)
                    .await
                    .map_err(|e| e.extend())?;
                match type_name.map(|name| name.to_uppercase()) {
                    Some(name) => records
                        .into_iter()
                        .filter(|record| record.type_name() == name)
                        .collect(),
                    None => records,
                }
            }
            (None, Some(type_name)) => spaces
                .get_by_type(&type_name, populate)
                .await
                .map_err(|e| e.extend())?,
            (None, None) => spaces.get_all(populate).await.map_err(|e| e.extend())?,
        };

        Ok(records.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct SpaceMutation;

#[Object]
impl SpaceMutation {
    async fn save_space(&self, ctx: &Context<'_>, input: SpaceInputObject) -> Result<SpaceOutput> {
        let mut record = services(ctx)?
            .spaces
            .save(input.into())
            .await
            .map_err(|e| e.extend())?;
        record.facility = selected_facility(ctx, &record.space.facility_id).await?;
        Ok(record.into())
    }

    async fn update_space(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: SpaceInputObject,
    ) -> Result<SpaceOutput> {
        let mut record = services(ctx)?
            .spaces
            .update(&id, input.into())
            .await
            .map_err(|e| e.extend())?;
        record.facility = selected_facility(ctx, &record.space.facility_id).await?;
        Ok(record.into())
    }

    async fn delete_space(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        services(ctx)?
            .spaces
            .delete(&id)
            .await
            .map_err(|e| e.extend())
    }
}
