//! Menu management API
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /api/menu/categories | GET, POST | list_categories, create_category |
//! | /api/menu/categories/{id} | PUT, DELETE | update_category, delete_category (cascades) |
//! | /api/menu/items | GET, POST | list_items (`?category_id=`), create_item |
//! | /api/menu/items/{id} | GET, PUT, DELETE | get_item, update_item, delete_item |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/categories/{id}",
            put(handler::update_category).delete(handler::delete_category),
        )
        .route("/items", get(handler::list_items).post(handler::create_item))
        .route(
            "/items/{id}",
            get(handler::get_item)
                .put(handler::update_item)
                .delete(handler::delete_item),
        )
}
