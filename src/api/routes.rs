//! HTTP API route definitions.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{
    create_item, create_user, delete_item, delete_user, get_item, get_user, health, list_items,
    list_users, metrics_text, process_item, root, update_item, AppState,
};
use super::ws::ws_upgrade;

/// Create the API router.
///
/// CORS is wide open: development default, same as the original services.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Service metadata
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // Items
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        // Users
        .route("/users", get(list_users).post(create_user))
        .route("/users/:username", get(get_user).delete(delete_user))
        // Background processing
        .route("/process/:id", post(process_item))
        // WebSocket
        .route("/ws", get(ws_upgrade))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
