//! OpenAPI document for the service.

use utoipa::OpenApi;

use crate::error::ErrorDetail;
use crate::store::{Item, NewItem, User};

use super::handlers::{HealthResponse, MessageResponse};

/// OpenAPI description of every documented endpoint.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "item-store",
        description = "Minimal in-memory item/user store exposed over HTTP"
    ),
    paths(
        super::handlers::health,
        super::handlers::list_items,
        super::handlers::create_item,
        super::handlers::get_item,
        super::handlers::update_item,
        super::handlers::delete_item,
        super::handlers::list_users,
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::delete_user,
        super::handlers::process_item,
    ),
    components(schemas(
        Item,
        NewItem,
        User,
        HealthResponse,
        MessageResponse,
        ErrorDetail
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_all_documented_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        for path in [
            "/health",
            "/items",
            "/items/{id}",
            "/users",
            "/users/{username}",
            "/process/{id}",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }
}
