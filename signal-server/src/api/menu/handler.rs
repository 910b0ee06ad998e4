//! Menu management handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub category_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDeleted {
    pub removed_items: usize,
}

// ========== Categories ==========

/// GET /api/menu/categories
pub async fn list_categories(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<MenuCategory>>>> {
    Ok(ok(state.menu.list_categories(&user.id)?))
}

/// POST /api/menu/categories
pub async fn create_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuCategoryCreate>,
) -> AppResult<Json<ApiResponse<MenuCategory>>> {
    Ok(ok(state.menu.create_category(&user.id, payload)?))
}

/// PUT /api/menu/categories/{id}
pub async fn update_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuCategoryUpdate>,
) -> AppResult<Json<ApiResponse<MenuCategory>>> {
    Ok(ok(state.menu.update_category(&user.id, &id, payload)?))
}

/// DELETE /api/menu/categories/{id}
pub async fn delete_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CategoryDeleted>>> {
    let removed_items = state.menu.delete_category(&user.id, &id)?;
    Ok(ok(CategoryDeleted { removed_items }))
}

// ========== Items ==========

/// GET /api/menu/items
pub async fn list_items(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    Ok(ok(state
        .menu
        .list_items(&user.id, query.category_id.as_deref())?))
}

/// GET /api/menu/items/{id}
pub async fn get_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    Ok(ok(state.menu.get_item(&user.id, &id)?))
}

/// POST /api/menu/items
pub async fn create_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    Ok(ok(state.menu.create_item(&user.id, payload)?))
}

/// PUT /api/menu/items/{id}
pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    Ok(ok(state.menu.update_item(&user.id, &id, payload)?))
}

/// DELETE /api/menu/items/{id}
pub async fn delete_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.menu.delete_item(&user.id, &id)?;
    Ok(Json(ApiResponse::ok()))
}
