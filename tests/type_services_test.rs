mod common;

use assert_matches::assert_matches;
use common::{operation_input, type_input, TestApp, HQ};
use facilities_api::{
    errors::ServiceError,
    repositories::Populate,
    services::{SpaceInput, TypeInput},
};
use uuid::Uuid;

#[tokio::test]
async fn save_uppercases_name_and_stamps_creation() {
    let app = TestApp::new().await;

    let created = app
        .services()
        .operation_types
        .save(type_input("cafeteria"))
        .await
        .unwrap();

    assert_eq!(created.name, "CAFETERIA");
    assert_eq!(created.description.as_deref(), Some("cafeteria description"));
    assert!(created.updated_at.is_none());

    let all = app.services().operation_types.get_all().await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn get_is_case_sensitive() {
    let app = TestApp::new().await;
    let types = &app.services().operation_types;
    types.save(type_input("Library")).await.unwrap();

    assert!(types.get("LIBRARY").await.unwrap().is_some());
    assert!(types.get("library").await.unwrap().is_none());
}

#[tokio::test]
async fn saving_same_name_in_any_case_fails() {
    let app = TestApp::new().await;
    let types = &app.services().operation_types;
    types.save(type_input("Gym")).await.unwrap();

    let err = types.save(type_input("gYM")).await.unwrap_err();
    assert_matches!(err, ServiceError::AlreadyExists(_));
    assert_eq!(err.to_string(), "Operation type GYM already exists.");
}

#[tokio::test]
async fn blank_fields_are_rejected_together() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .space_types
        .save(TypeInput {
            name: "  ".to_string(),
            description: Some("\t".to_string()),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::ValidationError(_));
    assert_eq!(
        err.to_string(),
        "The following fields cannot be blank: name, description."
    );
}

#[tokio::test]
async fn update_and_delete_of_unknown_id_report_not_found() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let err = app
        .services()
        .operation_types
        .update(&id.to_string(), type_input("ghost"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Unable to update operation type {id}. Operation type not found.")
    );

    let err = app
        .services()
        .space_types
        .delete(&id.to_string())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Unable to delete space type {id}. Space type not found.")
    );
}

#[tokio::test]
async fn malformed_id_is_rejected_before_lookup() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .operation_types
        .delete("not-a-uuid")
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidIdFormat(_));
}

#[tokio::test]
async fn update_changes_name_and_sets_updated_at() {
    let app = TestApp::new().await;
    let types = &app.services().space_types;
    let created = types.save(type_input("lab")).await.unwrap();

    let updated = types
        .update(
            &created.id.to_string(),
            TypeInput {
                name: "laboratory".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "LABORATORY");
    assert_eq!(updated.description, None);
    assert!(updated.updated_at.is_some());
    assert!(types.get("LAB").await.unwrap().is_none());
}

#[tokio::test]
async fn rename_into_existing_name_is_rejected() {
    let app = TestApp::new().await;
    let types = &app.services().operation_types;
    types.save(type_input("clinic")).await.unwrap();
    let other = types.save(type_input("pharmacy")).await.unwrap();

    let err = types
        .update(&other.id.to_string(), type_input("Clinic"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Operation type CLINIC already exists.");
}

#[tokio::test]
async fn type_in_use_cannot_be_deleted() {
    let app = TestApp::new().await;
    let services = app.services();
    let cafe = services.operation_types.save(type_input("cafe")).await.unwrap();
    services
        .operations
        .save(operation_input(HQ, "cafe", "Main cafe"))
        .await
        .unwrap();

    let err = services
        .operation_types
        .delete(&cafe.id.to_string())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::HasReferences(_));
    assert_eq!(
        err.to_string(),
        format!("Unable to delete operation type {}. It is referenced by 1 operations.", cafe.id)
    );
}

#[tokio::test]
async fn unused_type_is_deleted_and_no_longer_found() {
    let app = TestApp::new().await;
    let types = &app.services().space_types;
    let created = types.save(type_input("atrium")).await.unwrap();

    assert!(types.delete(&created.id.to_string()).await.unwrap());
    assert!(types.get("ATRIUM").await.unwrap().is_none());
}

#[tokio::test]
async fn rename_is_visible_through_referencing_entities() {
    let app = TestApp::new().await;
    let services = app.services();
    let room = services.space_types.save(type_input("room")).await.unwrap();
    let space = services
        .spaces
        .save(SpaceInput {
            facility_id: HQ.to_string(),
            space_type: "room".to_string(),
            description: "Room 101".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(space.type_name(), "ROOM");

    services
        .space_types
        .update(&room.id.to_string(), type_input("meeting room"))
        .await
        .unwrap();

    let reloaded = services
        .spaces
        .get(&space.space.id.to_string(), Populate::None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.type_name(), "MEETING ROOM");
}
