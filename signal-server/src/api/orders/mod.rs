//! Order management API
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /api/orders | GET | list (`?status=pending,ready`) |
//! | /api/orders/active | GET | active |
//! | /api/orders/table/{table} | GET | by_table |
//! | /api/orders/{id} | GET, DELETE | get, delete |
//! | /api/orders/{id}/status | PUT | update_status |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/active", get(handler::active))
        .route("/table/{table}", get(handler::by_table))
        .route("/{id}", get(handler::get).delete(handler::delete))
        .route("/{id}/status", put(handler::update_status))
}
