mod common;

use std::sync::{Arc, Mutex};

use axum::http::{Method, StatusCode};
use common::{first_error, full_week, operation_input, type_input, TestApp, HQ};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn type_mutations_and_queries() {
    let app = TestApp::new().await;

    let saved = app
        .graphql(
            r#"mutation($input: TypeInput!) {
                saveOperationType(input: $input) { id name description }
            }"#,
            json!({ "input": { "name": "cafe", "description": "Food and drink" } }),
        )
        .await;
    assert!(saved["errors"].is_null(), "{saved}");
    assert_eq!(saved["data"]["saveOperationType"]["name"], "CAFE");

    let found = app
        .graphql(
            r#"{ operationType(name: "CAFE") { name description } allOperationTypes { name } }"#,
            json!({}),
        )
        .await;
    assert_eq!(found["data"]["operationType"]["description"], "Food and drink");
    assert_eq!(found["data"]["allOperationTypes"], json!([{ "name": "CAFE" }]));

    let again = app
        .graphql(
            r#"mutation { saveOperationType(input: { name: "Cafe" }) { id } }"#,
            json!({}),
        )
        .await;
    assert_eq!(first_error(&again), Some("Operation type CAFE already exists."));
}

#[tokio::test]
async fn save_operation_populates_facility_only_when_selected() {
    let app = TestApp::new().await;
    app.services()
        .operation_types
        .save(type_input("cafe"))
        .await
        .unwrap();

    let hours: Vec<_> = full_week()
        .into_iter()
        .map(|h| json!({ "day": h.day, "open": h.open, "close": h.close }))
        .collect();
    let response = app
        .graphql(
            r#"mutation($input: OperationInput!) {
                saveOperation(input: $input) {
                    id type description facilityId
                    operationalHours { day open close }
                    facility { id name }
                }
            }"#,
            json!({ "input": {
                "facilityId": "hq1",
                "type": "cafe",
                "description": "Main cafe",
                "operationalHours": hours,
            }}),
        )
        .await;
    assert!(response["errors"].is_null(), "{response}");

    let operation = &response["data"]["saveOperation"];
    assert_eq!(operation["type"], "CAFE");
    assert_eq!(operation["facilityId"], HQ);
    assert_eq!(operation["facility"]["name"], "Headquarters");
    assert_eq!(operation["operationalHours"].as_array().map(Vec::len), Some(7));

    let listed = app
        .graphql(
            r#"query($facility: String) {
                allOperations(facilityId: $facility) { description type facility { id } }
            }"#,
            json!({ "facility": HQ }),
        )
        .await;
    assert_eq!(listed["data"]["allOperations"][0]["description"], "Main cafe");
    assert_eq!(listed["data"]["allOperations"][0]["facility"]["id"], HQ);
}

#[tokio::test]
async fn operation_filters_by_type() {
    let app = TestApp::new().await;
    let services = app.services();
    services.operation_types.save(type_input("cafe")).await.unwrap();
    services.operation_types.save(type_input("library")).await.unwrap();
    services
        .operations
        .save(operation_input(HQ, "cafe", "Main cafe"))
        .await
        .unwrap();
    services
        .operations
        .save(operation_input(HQ, "library", "Archive"))
        .await
        .unwrap();

    let response = app
        .graphql(
            r#"{ allOperations(facilityId: "HQ1", type: "library") { description } }"#,
            json!({}),
        )
        .await;
    assert_eq!(
        response["data"]["allOperations"],
        json!([{ "description": "Archive" }])
    );
}

#[tokio::test]
async fn notifications_expose_computed_activity() {
    let app = TestApp::new().await;

    let response = app
        .graphql(
            r#"mutation {
                saveNotification(input: {
                    facilityId: "HQ1",
                    title: "Open house",
                    description: "Visitors welcome",
                    startsOn: "2024-05-01"
                }) { id isActive endsOn }
            }"#,
            json!({}),
        )
        .await;
    assert!(response["errors"].is_null(), "{response}");
    assert_eq!(response["data"]["saveNotification"]["isActive"], true);
    assert!(response["data"]["saveNotification"]["endsOn"].is_null());

    let active = app
        .graphql(
            r#"{ allNotifications(facilityId: "HQ1", status: ACTIVE) { title isActive }
                 inactive: allNotifications(facilityId: "HQ1", status: INACTIVE) { title } }"#,
            json!({}),
        )
        .await;
    assert_eq!(
        active["data"]["allNotifications"],
        json!([{ "title": "Open house", "isActive": true }])
    );
    assert_eq!(active["data"]["inactive"], json!([]));

    let rejected = app
        .graphql(
            r#"mutation {
                saveNotification(input: {
                    facilityId: "HQ1", title: "t", description: "d",
                    startsOn: "2020-08-25", endsOn: "2020-08-20"
                }) { id }
            }"#,
            json!({}),
        )
        .await;
    assert_eq!(first_error(&rejected), Some("StartsOn should be prior to EndsOn"));
}

#[tokio::test]
async fn service_errors_surface_as_plain_messages() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let response = app
        .graphql(
            r#"mutation($id: ID!) { deleteSpace(id: $id) }"#,
            json!({ "id": id.to_string() }),
        )
        .await;
    assert_eq!(
        first_error(&response),
        Some(format!("Unable to delete space {id}. Space not found.").as_str())
    );

    let response = app
        .graphql(r#"{ operation(id: "nope") { id } }"#, json!({}))
        .await;
    assert_eq!(first_error(&response), Some("Invalid ID format: nope"));

    let response = app
        .graphql(r#"{ space(id: "6c1f1a4e-52e4-4a51-9d0e-1f1d6d0a3b55") { id } }"#, json!({}))
        .await;
    assert!(response["errors"].is_null());
    assert!(response["data"]["space"].is_null());
}

#[tokio::test]
async fn facilities_are_readable() {
    let app = TestApp::new().await;

    let response = app
        .graphql(
            r#"{ facility(id: "wh2") { id city } allFacilities { id } }"#,
            json!({}),
        )
        .await;
    assert_eq!(response["data"]["facility"], json!({ "id": "WH2", "city": "Shelbyville" }));
    assert_eq!(
        response["data"]["allFacilities"],
        json!([{ "id": "HQ1" }, { "id": "WH2" }])
    );
}

#[tokio::test]
async fn http_routes() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("facilities-api up"));

    let (status, body) = app.request(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "healthy");

    let (status, body) = app
        .post_graphql("{ allSpaceTypes { name } }", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["allSpaceTypes"], json!([]));

    let (status, body) = app.request(Method::GET, "/graphql", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body
        .as_str()
        .map(|html| html.to_lowercase().contains("graphiql"))
        .unwrap_or(false));
}

/// Keeps the message of every record it receives.
#[derive(Clone, Default)]
struct RecordingDrain(Arc<Mutex<Vec<String>>>);

impl slog::Drain for RecordingDrain {
    type Ok = ();
    type Err = slog::Never;

    fn log(&self, record: &slog::Record, _: &slog::OwnedKVList) -> Result<(), slog::Never> {
        self.0.lock().unwrap().push(record.msg().to_string());
        Ok(())
    }
}

#[tokio::test]
async fn each_request_is_access_logged_once() {
    let drain = RecordingDrain::default();
    let app = TestApp::with_logger(slog::Logger::root(drain.clone(), slog::o!())).await;

    app.request(Method::GET, "/", None).await;
    app.request(Method::GET, "/health", None).await;

    let records = drain.0.lock().unwrap();
    let access_lines = records
        .iter()
        .filter(|msg| msg.as_str() == "HTTP request handled")
        .count();
    assert_eq!(access_lines, 2);
}
