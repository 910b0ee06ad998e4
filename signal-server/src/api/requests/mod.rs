//! Staff request API
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /api/requests | GET | list (`?status=active\|completed\|all&from=&to=`) |
//! | /api/requests | POST | create |
//! | /api/requests/{id} | DELETE | delete |
//! | /api/requests/{id}/complete | POST | complete |
//! | /api/requests/history | GET | history |
//! | /api/requests/insights | GET | insights |
//! | /api/floor | GET | floor_status |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/requests", routes())
        .route("/api/floor", get(handler::floor_status))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/history", get(handler::history))
        .route("/insights", get(handler::insights))
        .route("/{id}", delete(handler::delete))
        .route("/{id}/complete", post(handler::complete))
}
