mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use common::{TestApp, HQ, WAREHOUSE};
use facilities_api::{
    entities::notification::{self, NotificationStatus},
    errors::ServiceError,
    repositories::{NotificationRepository, Populate},
    services::NotificationInput,
    validators::DateOrderError,
};
use uuid::Uuid;

fn input(starts_on: &str, ends_on: Option<&str>) -> NotificationInput {
    NotificationInput {
        facility_id: HQ.to_string(),
        title: "Fire drill".to_string(),
        description: "Evacuate via the north stairs".to_string(),
        starts_on: starts_on.to_string(),
        ends_on: ends_on.map(str::to_string),
    }
}

fn days_from_now(days: i64) -> String {
    (Utc::now() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn saves_open_ended_notification() {
    let app = TestApp::new().await;
    let notifications = &app.services().notifications;

    let saved = notifications.save(input("2020-08-25", None)).await.unwrap();
    assert_eq!(saved.facility_id, HQ);
    assert_eq!(saved.starts_on.format("%Y-%m-%d").to_string(), "2020-08-25");
    assert!(saved.ends_on.is_none());
    assert!(saved.updated_at.is_none());

    let fetched = notifications
        .get(&saved.id.to_string(), Populate::Facility)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.notification.title, "Fire drill");
    assert_eq!(fetched.facility.map(|f| f.code), Some(HQ.to_string()));
}

#[tokio::test]
async fn start_after_end_is_rejected() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .notifications
        .save(input("2020-08-25", Some("2020-08-20")))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::DateOrder(DateOrderError::StartsAfterEnds));
    assert_eq!(err.to_string(), "StartsOn should be prior to EndsOn");
}

#[tokio::test]
async fn end_in_past_is_rejected() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .notifications
        .save(input("2020-08-20", Some("2020-08-25")))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "EndsOn cannot be in the past");
}

#[tokio::test]
async fn identical_bounds_are_rejected() {
    let app = TestApp::new().await;
    let day = days_from_now(30);

    let err = app
        .services()
        .notifications
        .save(input(&day, Some(&day)))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "StartsOn and EndsOn cannot be identical");
}

#[tokio::test]
async fn malformed_date_names_the_field() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .notifications
        .save(input("2030-01-01", Some("01/02/2030")))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::DateFormat(_));
    assert_eq!(
        err.to_string(),
        "Invalid endsOn date: '01/02/2030'. Expected format YYYY-MM-DD or an ISO 8601 timestamp."
    );
}

#[tokio::test]
async fn facility_is_checked_before_dates() {
    let app = TestApp::new().await;
    let mut bad = input("garbage", None);
    bad.facility_id = "zz9".to_string();

    let err = app.services().notifications.save(bad).await.unwrap_err();
    assert_eq!(err.to_string(), "Facility ZZ9 not found.");
}

#[tokio::test]
async fn blank_title_is_rejected_after_dates() {
    let app = TestApp::new().await;
    let mut blank = input("2030-01-01", None);
    blank.title = "   ".to_string();

    let err = app.services().notifications.save(blank).await.unwrap_err();
    assert_eq!(err.to_string(), "The following fields cannot be blank: title.");
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = TestApp::new().await;
    let notifications = &app.services().notifications;
    let saved = notifications.save(input("2030-01-01", None)).await.unwrap();

    let end = days_from_now(60);
    let mut changes = input(&days_from_now(1), Some(&end));
    changes.facility_id = WAREHOUSE.to_lowercase();
    changes.title = "Power outage".to_string();

    let updated = notifications
        .update(&saved.id.to_string(), changes)
        .await
        .unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.facility_id, WAREHOUSE);
    assert_eq!(updated.title, "Power outage");
    assert_eq!(
        updated.ends_on.map(|d| d.format("%Y-%m-%d").to_string()),
        Some(end)
    );
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn update_and_delete_of_unknown_id_report_not_found() {
    let app = TestApp::new().await;
    let notifications = &app.services().notifications;
    let id = Uuid::new_v4();

    let err = notifications
        .update(&id.to_string(), input("2030-01-01", None))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Unable to update notification {id}. Notification not found.")
    );

    let err = notifications.delete(&id.to_string()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Unable to delete notification {id}. Notification not found.")
    );
}

fn stored(facility_id: &str, title: &str, ends_on: Option<chrono::DateTime<Utc>>) -> notification::Model {
    let now = Utc::now();
    notification::Model {
        id: Uuid::new_v4(),
        facility_id: facility_id.to_string(),
        title: title.to_string(),
        description: "details".to_string(),
        starts_on: now - Duration::days(10),
        ends_on,
        created_at: now,
        updated_at: None,
    }
}

fn titles(records: &[facilities_api::repositories::NotificationRecord]) -> Vec<&str> {
    let mut titles: Vec<&str> = records
        .iter()
        .map(|r| r.notification.title.as_str())
        .collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn status_filter_partitions_by_end_date() {
    let app = TestApp::new().await;
    let repo = NotificationRepository::new(app.state.db.clone());
    let now = Utc::now();

    repo.insert(stored(HQ, "open-ended", None)).await.unwrap();
    repo.insert(stored(HQ, "future", Some(now + Duration::days(3))))
        .await
        .unwrap();
    repo.insert(stored(HQ, "expired", Some(now - Duration::days(3))))
        .await
        .unwrap();
    repo.insert(stored(WAREHOUSE, "elsewhere", None))
        .await
        .unwrap();

    let notifications = &app.services().notifications;
    let all = notifications
        .get_by_facility(HQ, NotificationStatus::All, Populate::None)
        .await
        .unwrap();
    assert_eq!(titles(&all), vec!["expired", "future", "open-ended"]);

    let active = notifications
        .get_by_facility(HQ, NotificationStatus::Active, Populate::None)
        .await
        .unwrap();
    assert_eq!(titles(&active), vec!["future", "open-ended"]);

    let inactive = notifications
        .get_by_facility("hq1", NotificationStatus::Inactive, Populate::None)
        .await
        .unwrap();
    assert_eq!(titles(&inactive), vec!["expired"]);
}

#[tokio::test]
async fn notification_ending_exactly_now_is_neither_active_nor_inactive() {
    let app = TestApp::new().await;
    let repo = NotificationRepository::new(app.state.db.clone());
    let boundary = Utc::now() + Duration::hours(1);

    repo.insert(stored(HQ, "boundary", Some(boundary)))
        .await
        .unwrap();

    let active = repo
        .find_by_facility(HQ, NotificationStatus::Active, boundary, Populate::None)
        .await
        .unwrap();
    let inactive = repo
        .find_by_facility(HQ, NotificationStatus::Inactive, boundary, Populate::None)
        .await
        .unwrap();
    let all = repo
        .find_by_facility(HQ, NotificationStatus::All, boundary, Populate::None)
        .await
        .unwrap();

    assert!(active.is_empty());
    assert!(inactive.is_empty());
    assert_eq!(all.len(), 1);
}
