//! Order management handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Order, OrderStatus, OrderStatusUpdate, OrderWithItems};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Comma-separated status names
    pub status: Option<String>,
}

fn parse_statuses(raw: &str) -> AppResult<Vec<OrderStatus>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
                .map_err(|_| AppError::validation(format!("Unknown order status: {s}")))
        })
        .collect()
}

/// GET /api/orders
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<OrderWithItems>>>> {
    let statuses = query.status.as_deref().map(parse_statuses).transpose()?;
    Ok(ok(state.orders.list(&user.id, statuses.as_deref())?))
}

/// GET /api/orders/active
pub async fn active(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<OrderWithItems>>>> {
    Ok(ok(state.orders.list_active(&user.id)?))
}

/// GET /api/orders/table/{table}
pub async fn by_table(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(table): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<OrderWithItems>>>> {
    Ok(ok(state.orders.list_for_table(&user.id, table)?))
}

/// GET /api/orders/{id}
pub async fn get(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    Ok(ok(state.orders.get(&user.id, &id)?))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(ok(state.orders.update_status(&user.id, &id, payload.status)?))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.orders.delete(&user.id, &id)?;
    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_list_parsing() {
        assert_eq!(
            parse_statuses("pending, Ready").unwrap(),
            vec![OrderStatus::Pending, OrderStatus::Ready]
        );
        assert!(parse_statuses("").unwrap().is_empty());
        assert!(parse_statuses("eaten").is_err());
    }
}
