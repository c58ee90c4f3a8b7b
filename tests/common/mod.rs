#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use facilities_api::{
    app_router,
    config::AppConfig,
    db,
    entities::{facility, operation::OperationalHours},
    logging::discard_logger,
    repositories::FacilityRepository,
    services::{AppServices, OperationInput, TypeInput},
    validators::Weekday,
    AppState,
};
use serde_json::{json, Value};
use strum::IntoEnumIterator;
use tower::ServiceExt;

pub const HQ: &str = "HQ1";
pub const WAREHOUSE: &str = "WH2";

/// Application state backed by a fresh in-memory SQLite database with two
/// seeded facilities.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_logger(discard_logger()).await
    }

    pub async fn with_logger(logger: slog::Logger) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.cors_allow_any_origin = true;
        // One connection: every in-memory SQLite connection is its own database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let facilities = FacilityRepository::new(db_arc.clone());
        for (code, name, city) in [(HQ, "Headquarters", "Springfield"), (WAREHOUSE, "Warehouse", "Shelbyville")] {
            facilities
                .insert(sample_facility(code, name, city))
                .await
                .expect("seed facility");
        }

        let state = AppState::new(db_arc, cfg, logger);
        let router = app_router(state.clone());

        Self { router, state }
    }

    pub fn services(&self) -> &AppServices {
        &self.state.services
    }

    /// Executes a GraphQL request directly against the schema and returns the
    /// serialized response (`data` and `errors`).
    pub async fn graphql(&self, query: &str, variables: Value) -> Value {
        let request = async_graphql::Request::new(query)
            .variables(async_graphql::Variables::from_json(variables));
        let response = self.state.schema.execute(request).await;
        serde_json::to_value(&response).expect("serialize graphql response")
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("router response");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn post_graphql(&self, query: &str, variables: Value) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/graphql",
            Some(json!({ "query": query, "variables": variables })),
        )
        .await
    }
}

pub fn sample_facility(code: &str, name: &str, city: &str) -> facility::Model {
    facility::Model {
        code: code.to_string(),
        name: name.to_string(),
        street: "1 Main Street".to_string(),
        city: city.to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        latitude: 39.7817,
        longitude: -89.6501,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub fn type_input(name: &str) -> TypeInput {
    TypeInput {
        name: name.to_string(),
        description: Some(format!("{name} description")),
    }
}

pub fn full_week() -> Vec<OperationalHours> {
    Weekday::iter()
        .map(|day| OperationalHours {
            day: day.to_string(),
            open: "8:00 AM".to_string(),
            close: "5:00 PM".to_string(),
        })
        .collect()
}

pub fn operation_input(facility_id: &str, type_name: &str, description: &str) -> OperationInput {
    OperationInput {
        facility_id: facility_id.to_string(),
        operation_type: type_name.to_string(),
        description: description.to_string(),
        poc: Some("Pat Doe".to_string()),
        email: Some("pat@example.com".to_string()),
        ..Default::default()
    }
}

/// First error message of a GraphQL response, if any.
pub fn first_error(response: &Value) -> Option<&str> {
    response["errors"][0]["message"].as_str()
}
