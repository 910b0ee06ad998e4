//! Floor plan API
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /api/layout | GET | reconciled layout with seat markers |
//! | /api/layout | PUT | save edited geometry |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::models::{LayoutSave, PositionedTable, TableLayout};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::layout::with_seats;
use crate::utils::{ApiResponse, AppResult, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/layout", get(get_layout).put(save_layout))
}

#[derive(Debug, Serialize)]
pub struct LayoutView {
    pub name: String,
    pub updated_at: i64,
    pub tables: Vec<PositionedTable>,
}

impl From<TableLayout> for LayoutView {
    fn from(layout: TableLayout) -> Self {
        Self {
            name: layout.name,
            updated_at: layout.updated_at,
            tables: with_seats(layout.positions),
        }
    }
}

async fn get_layout(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<LayoutView>>> {
    let config = state.settings.for_owner(&user.id)?;
    let layout = state.layout.load(&config)?;
    Ok(ok(layout.into()))
}

async fn save_layout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<LayoutSave>,
) -> AppResult<Json<ApiResponse<LayoutView>>> {
    let config = state.settings.for_owner(&user.id)?;
    let layout = state.layout.save(&config, payload)?;
    Ok(ok(layout.into()))
}
