//! Guest API
//!
//! Reachable without a staff token. Routes without a slug serve the
//! configured default tenant.
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /api/public/requests | POST | create_request |
//! | /api/public/requests/{id} | DELETE | cancel_request |
//! | /api/public/tables/{table} | GET | table_info |
//! | /api/public/menu | GET | menu |
//! | /api/public/menu/items/{id} | GET | menu_item |
//! | /api/public/orders | POST | submit_order |
//! | /api/public/{slug}/... | | same routes for a named tenant |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<ServerState> {
    let default_tenant = Router::new()
        .route("/requests", post(handler::create_request))
        .route("/requests/{id}", delete(handler::cancel_request))
        .route("/tables/{table}", get(handler::table_info))
        .route("/menu", get(handler::menu))
        .route("/menu/items/{id}", get(handler::menu_item))
        .route("/orders", post(handler::submit_order));

    let named_tenant = Router::new()
        .route("/{slug}/requests", post(handler::create_request_for))
        .route("/{slug}/requests/{id}", delete(handler::cancel_request_for))
        .route("/{slug}/tables/{table}", get(handler::table_info_for))
        .route("/{slug}/menu", get(handler::menu_for))
        .route("/{slug}/menu/items/{id}", get(handler::menu_item_for))
        .route("/{slug}/orders", post(handler::submit_order_for));

    default_tenant.merge(named_tenant)
}
