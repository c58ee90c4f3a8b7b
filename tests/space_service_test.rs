mod common;

use assert_matches::assert_matches;
use common::{type_input, TestApp, HQ, WAREHOUSE};
use facilities_api::{errors::ServiceError, repositories::Populate, services::SpaceInput};
use uuid::Uuid;

fn space(facility_id: &str, type_name: &str, description: &str) -> SpaceInput {
    SpaceInput {
        facility_id: facility_id.to_string(),
        space_type: type_name.to_string(),
        description: description.to_string(),
    }
}

async fn app_with_types(names: &[&str]) -> TestApp {
    let app = TestApp::new().await;
    for name in names {
        app.services().space_types.save(type_input(name)).await.unwrap();
    }
    app
}

#[tokio::test]
async fn saves_space_with_normalized_keys() {
    let app = app_with_types(&["office"]).await;
    let spaces = &app.services().spaces;

    let saved = spaces.save(space("hq1", "Office", "Corner office")).await.unwrap();
    assert_eq!(saved.space.facility_id, HQ);
    assert_eq!(saved.type_name(), "OFFICE");
    assert!(saved.facility.is_none());

    let fetched = spaces
        .get(&saved.space.id.to_string(), Populate::Facility)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.space.description, "Corner office");
    assert_eq!(fetched.facility.map(|f| f.name), Some("Headquarters".to_string()));
}

#[tokio::test]
async fn duplicate_space_is_rejected() {
    let app = app_with_types(&["office"]).await;
    let spaces = &app.services().spaces;
    spaces.save(space(HQ, "office", "Corner office")).await.unwrap();

    let err = spaces
        .save(space("Hq1", "OFFICE", "Corner office"))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::DuplicateEntity(_));
    assert_eq!(
        err.to_string(),
        "Space 'Corner office' of type OFFICE already exists for facility HQ1."
    );
}

#[tokio::test]
async fn unknown_type_and_facility_are_rejected() {
    let app = app_with_types(&["office"]).await;
    let spaces = &app.services().spaces;

    let err = spaces.save(space(HQ, "vault", "Safe room")).await.unwrap_err();
    assert_eq!(err.to_string(), "Space type VAULT not found.");

    let err = spaces.save(space("zz1", "vault", "Safe room")).await.unwrap_err();
    assert_matches!(err, ServiceError::FacilityNotFound(_));
}

#[tokio::test]
async fn blank_description_is_rejected() {
    let app = app_with_types(&["office"]).await;

    let err = app
        .services()
        .spaces
        .save(space(HQ, "office", " "))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The following fields cannot be blank: description."
    );
}

#[tokio::test]
async fn update_moves_space_and_keeps_identity() {
    let app = app_with_types(&["office", "storage"]).await;
    let spaces = &app.services().spaces;
    let saved = spaces.save(space(HQ, "office", "Corner office")).await.unwrap();

    let updated = spaces
        .update(
            &saved.space.id.to_string(),
            space(WAREHOUSE, "storage", "Bay 4"),
        )
        .await
        .unwrap();
    assert_eq!(updated.space.id, saved.space.id);
    assert_eq!(updated.space.facility_id, WAREHOUSE);
    assert_eq!(updated.type_name(), "STORAGE");
    assert_eq!(updated.space.created_at, saved.space.created_at);
    assert!(updated.space.updated_at.is_some());

    let id = Uuid::new_v4();
    let err = spaces
        .update(&id.to_string(), space(HQ, "office", "Nowhere"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Unable to update space {id}. Space not found.")
    );
}

#[tokio::test]
async fn delete_frees_the_space_type() {
    let app = app_with_types(&["office"]).await;
    let services = app.services();
    let saved = services
        .spaces
        .save(space(HQ, "office", "Corner office"))
        .await
        .unwrap();
    let office = services.space_types.get("OFFICE").await.unwrap().unwrap();

    let err = services
        .space_types
        .delete(&office.id.to_string())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::HasReferences(_));

    assert!(services.spaces.delete(&saved.space.id.to_string()).await.unwrap());
    assert!(services.space_types.delete(&office.id.to_string()).await.unwrap());
}

#[tokio::test]
async fn lists_by_facility_and_type() {
    let app = app_with_types(&["office", "storage"]).await;
    let spaces = &app.services().spaces;
    spaces.save(space(HQ, "office", "Corner office")).await.unwrap();
    spaces.save(space(HQ, "storage", "Closet")).await.unwrap();
    spaces.save(space(WAREHOUSE, "storage", "Bay 4")).await.unwrap();

    assert_eq!(spaces.get_all(Populate::None).await.unwrap().len(), 3);
    assert_eq!(
        spaces.get_by_facility("wh2", Populate::None).await.unwrap().len(),
        1
    );

    let storage = spaces.get_by_type("storage", Populate::Facility).await.unwrap();
    let mut facilities: Vec<_> = storage
        .iter()
        .filter_map(|r| r.facility.as_ref().map(|f| f.code.as_str()))
        .collect();
    facilities.sort();
    assert_eq!(facilities, vec![HQ, WAREHOUSE]);
}
