//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness (public)
//! - [`public`] - guest request, table, menu and order routes (public)
//! - [`requests`] - staff request lifecycle, history, insights, floor status
//! - [`settings`] - tenant table configuration
//! - [`layout`] - floor plan
//! - [`menu`] - menu catalogue management
//! - [`orders`] - order management

pub mod health;
pub mod layout;
pub mod menu;
pub mod orders;
pub mod public;
pub mod requests;
pub mod settings;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(health::router())
        .merge(public::router())
        // Staff (token required)
        .merge(requests::router())
        .merge(settings::router())
        .merge(layout::router())
        .merge(menu::router())
        .merge(orders::router())
}

/// Router with middleware and state applied, used by the server and tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // Staff token check; public paths are skipped inside the middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
