use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::repositories::NotificationRecord;

use super::{
    populate, selected_facility, services,
    types::{NotificationInputObject, NotificationOutput, NotificationStatusFilter},
};

#[derive(Default)]
pub struct NotificationQuery;

#[Object]
impl NotificationQuery {
    async fn notification(&self, ctx: &Context<'_>, id: ID) -> Result<Option<NotificationOutput>> {
        let record = services(ctx)?
            .notifications
            .get(&id, populate(ctx))
            .await
            .map_err(|e| e.extend())?;
        Ok(record.map(Into::into))
    }

    async fn all_notifications(
        &self,
        ctx: &Context<'_>,
        facility_id: String,
        #[graphql(default_with = "NotificationStatusFilter::All")] status: NotificationStatusFilter,
    ) -> Result<Vec<NotificationOutput>> {
        let records = services(ctx)?
            .notifications
            .get_by_facility(&facility_id, status.into(), populate(ctx))
            .await
            .map_err(|e| e.extend())?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct NotificationMutation;

#[Object]
impl NotificationMutation {
    async fn save_notification(
        &self,
        ctx: &Context<'_>,
        input: NotificationInputObject,
    ) -> Result<NotificationOutput> {
        let notification = services(ctx)?
            .notifications
            .save(input.into())
            .await
            .map_err(|e| e.extend())?;
        let mut record = NotificationRecord::from(notification);
        record.facility = selected_facility(ctx, &record.notification.facility_id).await?;
        Ok(record.into())
    }

    async fn update_notification(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: NotificationInputObject,
    ) -> Result<NotificationOutput> {
        let notification = services(ctx)?
            .notifications
            .update(&id, input.into())
            .await
            .map_err(|e| e.extend())?;
        let mut record = NotificationRecord::from(notification);
        record.facility = selected_facility(ctx, &record.notification.facility_id).await?;
        Ok(record.into())
    }

    async fn delete_notification(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        services(ctx)?
            .notifications
            .delete(&id)
            .await
            .map_err(|e| e.extend())
    }
}
