//! HTTP API for the crudstore resource store.
//!
//! Routes `/resources` CRUD onto a [`ResourceBackend`], deriving a deadline
//! for every request from the server's configured timeout (optionally
//! shortened by the client through [`TIMEOUT_HEADER`]).

pub mod config;
pub mod error;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use crudstore_model::{Entity, Fields};
use crudstore_storage::ResourceBackend;
use crudstore_types::{Deadline, EntityId};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Request header a client uses to ask for a shorter deadline, in milliseconds.
pub const TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn ResourceBackend>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(backend: Arc<dyn ResourceBackend>, request_timeout: Duration) -> Self {
        Self {
            backend,
            request_timeout,
        }
    }

    /// Deadline for one request: the server timeout, or the client's shorter one.
    fn deadline(&self, headers: &HeaderMap) -> Result<Deadline, ApiError> {
        let timeout = match headers.get(TIMEOUT_HEADER) {
            Some(raw) => raw
                .to_str()
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .ok_or_else(|| ApiError::BadRequest(format!("invalid {TIMEOUT_HEADER} header")))?
                .min(self.request_timeout),
            None => self.request_timeout,
        };
        Ok(Deadline::after(timeout))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub resources: usize,
}

fn parse_id(raw: &str) -> Result<EntityId, ApiError> {
    EntityId::parse(raw).map_err(|_| ApiError::BadRequest("invalid resource id".into()))
}

fn parse_body(body: Result<Json<Fields>, JsonRejection>) -> Result<Fields, ApiError> {
    body.map(|Json(fields)| fields)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        resources: state.backend.count().await,
    })
}

async fn list_resources(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Entity>>, ApiError> {
    let deadline = state.deadline(&headers)?;
    let mut entities = state.backend.list(deadline).await?;
    entities.sort_by_key(|e| e.id);
    Ok(Json(entities))
}

async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Entity>, ApiError> {
    let id = parse_id(&id)?;
    let deadline = state.deadline(&headers)?;
    Ok(Json(state.backend.get(id, deadline).await?))
}

async fn create_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Fields>, JsonRejection>,
) -> Result<(StatusCode, Json<Entity>), ApiError> {
    let fields = parse_body(body)?;
    let deadline = state.deadline(&headers)?;
    let entity = state.backend.create(fields, deadline).await?;
    Ok((StatusCode::CREATED, Json(entity)))
}

async fn update_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Fields>, JsonRejection>,
) -> Result<Json<Entity>, ApiError> {
    let id = parse_id(&id)?;
    let fields = parse_body(body)?;
    let deadline = state.deadline(&headers)?;
    Ok(Json(state.backend.update(id, fields, deadline).await?))
}

async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let deadline = state.deadline(&headers)?;
    state.backend.delete(id, deadline).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// CORS policy admitting only `origins`, for the CRUD methods.
pub fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(TIMEOUT_HEADER)])
}

/// Build the HTTP API router. CORS is only enabled when `allowed_origins` is non-empty.
pub fn build_router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/resources", get(list_resources).post(create_resource))
        .route(
            "/resources/{id}",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if allowed_origins.is_empty() {
        router
    } else {
        router.layer(cors_layer(allowed_origins))
    }
}
