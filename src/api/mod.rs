//! HTTP API module: handlers, routes, WebSocket, and OpenAPI documentation.

pub mod docs;
pub mod handlers;
pub mod routes;
pub mod ws;

pub use handlers::AppState;
pub use routes::create_router;
