//! Guest API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    MenuCategoryWithItems, MenuItem, OrderSubmission, OrderWithItems, PublicRequestCreate,
    PublicRequestCreated, PublicTableInfo,
};

use crate::core::ServerState;
use crate::public::ClientIp;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok, ok_with_message};

// ========== Requests ==========

/// POST /api/public/requests
pub async fn create_request(
    State(state): State<ServerState>,
    ClientIp(ip): ClientIp,
    Json(payload): Json<PublicRequestCreate>,
) -> AppResult<Json<ApiResponse<PublicRequestCreated>>> {
    let slug = state.settings.default_slug().to_string();
    create(&state, &slug, &ip, payload)
}

/// POST /api/public/{slug}/requests
pub async fn create_request_for(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    ClientIp(ip): ClientIp,
    Json(payload): Json<PublicRequestCreate>,
) -> AppResult<Json<ApiResponse<PublicRequestCreated>>> {
    create(&state, &slug, &ip, payload)
}

fn create(
    state: &ServerState,
    slug: &str,
    ip: &str,
    payload: PublicRequestCreate,
) -> AppResult<Json<ApiResponse<PublicRequestCreated>>> {
    let created = state.public.create(slug, ip, payload)?;
    Ok(ok_with_message(created, "Request sent"))
}

/// DELETE /api/public/requests/{id}
pub async fn cancel_request(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.public.cancel(&id)?;
    Ok(Json(ApiResponse::ok()))
}

/// DELETE /api/public/{slug}/requests/{id}
///
/// Cancel is keyed by request id alone; the slug only shapes the URL.
pub async fn cancel_request_for(
    State(state): State<ServerState>,
    Path((_slug, id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.public.cancel(&id)?;
    Ok(Json(ApiResponse::ok()))
}

// ========== Table page ==========

/// GET /api/public/tables/{table}
pub async fn table_info(
    State(state): State<ServerState>,
    Path(table): Path<i32>,
) -> AppResult<Json<ApiResponse<PublicTableInfo>>> {
    let slug = state.settings.default_slug().to_string();
    lookup_table(&state, &slug, table)
}

/// GET /api/public/{slug}/tables/{table}
pub async fn table_info_for(
    State(state): State<ServerState>,
    Path((slug, table)): Path<(String, i32)>,
) -> AppResult<Json<ApiResponse<PublicTableInfo>>> {
    lookup_table(&state, &slug, table)
}

fn lookup_table(
    state: &ServerState,
    slug: &str,
    table: i32,
) -> AppResult<Json<ApiResponse<PublicTableInfo>>> {
    let info = state
        .settings
        .public_table_info(slug, table)?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidTable).with_detail("table", table))?;
    Ok(ok(info))
}

// ========== Menu ==========

/// GET /api/public/menu
pub async fn menu(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<MenuCategoryWithItems>>>> {
    Ok(ok(state.menu.public_menu(state.settings.default_slug())?))
}

/// GET /api/public/{slug}/menu
pub async fn menu_for(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<MenuCategoryWithItems>>>> {
    Ok(ok(state.menu.public_menu(&slug)?))
}

/// GET /api/public/menu/items/{id}
pub async fn menu_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    Ok(ok(state.menu.public_item(state.settings.default_slug(), &id)?))
}

/// GET /api/public/{slug}/menu/items/{id}
pub async fn menu_item_for(
    State(state): State<ServerState>,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    Ok(ok(state.menu.public_item(&slug, &id)?))
}

// ========== Orders ==========

/// POST /api/public/orders
pub async fn submit_order(
    State(state): State<ServerState>,
    Json(payload): Json<OrderSubmission>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let placed = state
        .submitter
        .submit(state.settings.default_slug(), payload)?;
    Ok(ok_with_message(placed, "Order placed"))
}

/// POST /api/public/{slug}/orders
pub async fn submit_order_for(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<OrderSubmission>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let placed = state.submitter.submit(&slug, payload)?;
    Ok(ok_with_message(placed, "Order placed"))
}
