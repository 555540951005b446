//! HTTP API handlers.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorDetail};
use crate::metrics;
use crate::processor::Processor;
use crate::store::{Item, ItemStore, NewItem, User, UserStore};

/// Service name reported by the metadata endpoints.
pub const SERVICE_NAME: &str = "item-store";

/// Application state shared with handlers.
///
/// Owns the stores and the processor explicitly; there are no process-wide
/// singletons. All fields are cheap handles, so cloning the state per
/// request is fine.
#[derive(Clone)]
pub struct AppState {
    /// Shared item store.
    pub items: ItemStore,
    /// Shared user store.
    pub users: UserStore,
    /// Background processor bound to the item store.
    pub processor: Processor,
    /// Interval between WebSocket ping frames.
    pub ws_ping: Duration,
    /// Prometheus render handle, present once a recorder is installed.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Create fresh state with the given background-processing delay.
    pub fn new(process_delay: Duration) -> Self {
        let items = ItemStore::new();
        Self {
            processor: Processor::new(items.clone(), process_delay),
            items,
            users: UserStore::new(),
            ws_ping: Duration::from_secs(10),
            metrics_handle: None,
        }
    }

    /// Override the WebSocket ping interval.
    pub fn with_ws_ping(mut self, interval: Duration) -> Self {
        self.ws_ping = interval;
        self
    }

    /// Attach a Prometheus render handle for the /metrics endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

/// Service metadata returned by the root endpoint.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub service: &'static str,
    /// Always "running".
    pub status: &'static str,
    /// Current time.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Endpoint directory.
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Current time.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Fixed confirmation message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: &'static str,
}

/// Root handler - service metadata and endpoint directory.
pub async fn root() -> impl IntoResponse {
    let mut endpoints = BTreeMap::new();
    endpoints.insert("GET /health", "Health check");
    endpoints.insert("GET /items", "List all items");
    endpoints.insert("POST /items", "Create new item");
    endpoints.insert("GET /items/{id}", "Get item by ID");
    endpoints.insert("PUT /items/{id}", "Update item");
    endpoints.insert("DELETE /items/{id}", "Delete item");
    endpoints.insert("GET /users", "List all users");
    endpoints.insert("POST /users", "Create or overwrite user");
    endpoints.insert("GET /users/{username}", "Get user by username");
    endpoints.insert("DELETE /users/{username}", "Delete user");
    endpoints.insert("POST /process/{id}", "Trigger background processing");
    endpoints.insert("WS /ws", "WebSocket connection");
    endpoints.insert("GET /metrics", "Prometheus metrics");

    Json(ServiceInfo {
        service: SERVICE_NAME,
        status: "running",
        timestamp: OffsetDateTime::now_utc(),
        endpoints,
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// Prometheus metrics handler.
///
/// Returns 404 until a recorder handle is attached (tests build state
/// without one).
pub async fn metrics_text(State(state): State<AppState>) -> Response {
    match state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// List all items, ordered by id.
#[utoipa::path(
    get,
    path = "/items",
    responses((status = 200, description = "All stored items", body = [Item]))
)]
pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.items.list())
}

/// Create a new item.
#[utoipa::path(
    post,
    path = "/items",
    request_body = NewItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 422, description = "Malformed request body"),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(new): Json<NewItem>,
) -> impl IntoResponse {
    let item = state.items.insert(new);
    metrics::inc_items_created();
    (StatusCode::CREATED, Json(item))
}

/// Get an item by id.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = u64, Path, description = "Item id")),
    responses(
        (status = 200, description = "The stored item", body = Item),
        (status = 404, description = "Item not found", body = ErrorDetail),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Item>, ApiError> {
    state.items.get(id).map(Json).ok_or(ApiError::ItemNotFound)
}

/// Replace an item's fields, stamping `updated_at`.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = u64, Path, description = "Item id")),
    request_body = NewItem,
    responses(
        (status = 200, description = "The updated item", body = Item),
        (status = 404, description = "Item not found", body = ErrorDetail),
        (status = 422, description = "Malformed request body"),
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(new): Json<NewItem>,
) -> Result<Json<Item>, ApiError> {
    let item = state.items.update(id, new).ok_or(ApiError::ItemNotFound)?;
    metrics::inc_items_updated();
    Ok(Json(item))
}

/// Delete an item.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = u64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Item not found", body = ErrorDetail),
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.items.remove(id).ok_or(ApiError::ItemNotFound)?;
    metrics::inc_items_deleted();
    Ok(Json(MessageResponse {
        message: "Item deleted successfully",
    }))
}

/// List all users, ordered by username.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All stored users", body = [User]))
)]
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.users.list())
}

/// Create or silently overwrite a user under its username.
#[utoipa::path(
    post,
    path = "/users",
    request_body = User,
    responses(
        (status = 201, description = "User stored", body = User),
        (status = 422, description = "Malformed request body"),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> impl IntoResponse {
    let user = state.users.upsert(user);
    metrics::inc_users_upserted();
    (StatusCode::CREATED, Json(user))
}

/// Get a user by username.
#[utoipa::path(
    get,
    path = "/users/{username}",
    params(("username" = String, Path, description = "Username key")),
    responses(
        (status = 200, description = "The stored user", body = User),
        (status = 404, description = "User not found", body = ErrorDetail),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .users
        .get(&username)
        .map(Json)
        .ok_or(ApiError::UserNotFound)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{username}",
    params(("username" = String, Path, description = "Username key")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorDetail),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.users.remove(&username).ok_or(ApiError::UserNotFound)?;
    metrics::inc_users_deleted();
    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

/// Trigger background processing for an item.
///
/// Responds as soon as the task is scheduled; the processed flag appears
/// after the configured delay.
#[utoipa::path(
    post,
    path = "/process/{id}",
    params(("id" = u64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Processing scheduled", body = MessageResponse),
        (status = 404, description = "Item not found", body = ErrorDetail),
    )
)]
pub async fn process_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.items.contains(id) {
        return Err(ApiError::ItemNotFound);
    }

    // Detached on purpose; the handle only matters to tests and shutdown.
    let _task = state.processor.schedule(id);

    Ok(Json(MessageResponse {
        message: "Processing started",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_stores_start_empty() {
        let state = AppState::new(Duration::from_secs(5));
        assert!(state.items.is_empty());
        assert!(state.users.is_empty());
        assert!(state.metrics_handle.is_none());
    }

    #[test]
    fn processor_shares_the_item_store() {
        let state = AppState::new(Duration::from_secs(5));
        let item = state.items.insert(NewItem {
            name: "Widget".to_string(),
            price: 9.99,
            description: None,
        });

        assert_eq!(state.processor.delay(), Duration::from_secs(5));
        assert!(state.items.contains(item.id));
    }
}
