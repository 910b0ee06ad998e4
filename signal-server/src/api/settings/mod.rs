//! Settings API
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /api/settings | GET | get (created with defaults on first read) |
//! | /api/settings | PUT, PATCH | update (absent fields keep their value) |

use axum::{Json, Router, extract::State, routing::get};
use shared::models::{SettingsUpdate, TableConfiguration};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/settings", get(get_settings).put(update).patch(update))
}

async fn get_settings(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<TableConfiguration>>> {
    Ok(ok(state.settings.for_owner(&user.id)?))
}

async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<ApiResponse<TableConfiguration>>> {
    let settings = state.settings.update(&user.id, payload)?;
    tracing::info!(
        company_slug = %settings.company_slug,
        user = %user.username,
        "Settings updated"
    );
    Ok(ok(settings))
}
