//! Facility information service: facilities, their operations, spaces and
//! notifications, and the operation/space type taxonomies, served over
//! GraphQL.

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod graphql;
pub mod logging;
pub mod migrator;
pub mod repositories;
pub mod services;
pub mod validators;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use slog::Logger;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::graphql::{build_schema, FacilitiesSchema, SchemaLimits};
use crate::logging::{logging_middleware, LoggingState};
use crate::services::AppServices;

const GRAPHQL_PATH: &str = "/graphql";

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: AppServices,
    pub schema: FacilitiesSchema,
    pub logger: Logger,
}

impl AppState {
    /// Wires services and the schema on top of an open pool.
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig, logger: Logger) -> Self {
        let services = AppServices::new(db.clone(), logger.clone());
        let schema = build_schema(services.clone(), SchemaLimits::from(&config));
        Self {
            db,
            config,
            services,
            schema,
            logger,
        }
    }
}

/// Builds the HTTP router: liveness, health, and the GraphQL endpoint.
pub fn app_router(state: AppState) -> Router {
    let graphql_route = if state.config.graphql_playground {
        get(graphiql).post(graphql_handler)
    } else {
        post(graphql_handler)
    };
    let logging_state = Arc::new(LoggingState::new(state.logger.clone()));

    Router::new()
        .route("/", get(|| async { "facilities-api up" }))
        .route("/health", get(health_check))
        .route(GRAPHQL_PATH, graphql_route)
        .layer(axum::middleware::from_fn_with_state(
            logging_state,
            logging_middleware,
        ))
        // Request spans only; the access line comes from the slog layer.
        .layer(TraceLayer::new_for_http().on_request(()).on_response(()))
        .with_state(state)
}

/// CORS from config: explicit origins, else permissive when allowed.
pub fn cors_layer(cfg: &config::AppConfig) -> anyhow::Result<CorsLayer> {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.should_allow_permissive_cors() {
        tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        Ok(CorsLayer::permissive())
    } else {
        anyhow::bail!(
            "Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true"
        )
    }
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match db::check_connection(&state.db).await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let status = if db_status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status, Json(body))
}

pub mod prelude {
    pub use crate::errors::ServiceError;
    pub use crate::graphql::{build_schema, FacilitiesSchema, SchemaLimits};
    pub use crate::repositories::Populate;
    pub use crate::services::*;
}
