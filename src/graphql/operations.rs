use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::{
    populate, selected_facility, services,
    types::{OperationInputObject, OperationOutput},
};

#[derive(Default)]
pub struct OperationQuery;

#[Object]
impl OperationQuery {
    async fn operation(&self, ctx: &Context<'_>, id: ID) -> Result<Option<OperationOutput>> {
        let record = services(ctx)?
            .operations
            .get(&id, populate(ctx))
            .await
            .map_err(|e| e.extend())?;
        Ok(record.map(Into::into))
    }

    /// Operations of a facility, of a type, or both. With no filter every
    /// operation is returned.
    async fn all_operations(
        &self,
        ctx: &Context<'_>,
        facility_id: Option<String>,
        #[graphql(name = "type")] type_name: Option<String>,
    ) -> Result<Vec<OperationOutput>> {
        let operations = &services(ctx)?.operations;
        let populate = populate(ctx);

        let records = match (facility_id, type_name) {
            (Some(facility_id), type_name) => {
                let records = operations
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
            (None, Some(type_name)) => operations
                .get_by_type(&type_name, populate)
                .await
                .map_err(|e| e.extend())?,
            (None, None) => operations
                .get_all(populate)
                .await
                .map_err(|e| e.extend())?,
        };

        Ok(records.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct OperationMutation;

#[Object]
impl OperationMutation {
    async fn save_operation(
        &self,
        ctx: &Context<'_>,
        input: OperationInputObject,
    ) -> Result<OperationOutput> {
        let mut record = services(ctx)?
            .operations
            .save(input.into())
            .await
            .map_err(|e| e.extend())?;
        record.facility = selected_facility(ctx, &record.operation.facility_id).await?;
        Ok(record.into())
    }

    async fn update_operation(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: OperationInputObject,
    ) -> Result<OperationOutput> {
        let mut record = services(ctx)?
            .operations
            .update(&id, input.into())
            .await
            .map_err(|e| e.extend())?;
        record.facility = selected_facility(ctx, &record.operation.facility_id).await?;
        Ok(record.into())
    }

    async fn delete_operation(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        services(ctx)?
            .operations
            .delete(&id)
            .await
            .map_err(|e| e.extend())
    }
}
