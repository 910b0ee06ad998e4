//! Staff request handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{RequestInsights, RequestRange, ServiceRequest, ServiceRequestCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::status::{self, CardView, TableStatusView};
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Active,
    Completed,
    All,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: StatusFilter,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl From<&RangeQuery> for RequestRange {
    fn from(q: &RangeQuery) -> Self {
        RequestRange {
            from: q.from,
            to: q.to,
        }
    }
}

/// A request with its card status at response time
#[derive(Debug, Serialize)]
pub struct RequestCard {
    #[serde(flatten)]
    pub request: ServiceRequest,
    pub card: CardView,
    pub elapsed_display: String,
}

fn to_cards(requests: Vec<ServiceRequest>, now_millis: i64) -> Vec<RequestCard> {
    requests
        .into_iter()
        .map(|request| {
            let card = status::card_status(&request, now_millis);
            RequestCard {
                elapsed_display: status::format_elapsed(card.elapsed_secs),
                card,
                request,
            }
        })
        .collect()
}

/// GET /api/requests
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<RequestCard>>>> {
    let range = RequestRange {
        from: query.from,
        to: query.to,
    };
    let requests = match query.status {
        StatusFilter::Active => state.requests.list_active(&user.id)?,
        StatusFilter::Completed => state.requests.list_completed(&user.id, range)?,
        StatusFilter::All => state.requests.list_all(&user.id)?,
    };
    Ok(ok(to_cards(requests, state.clock.now_millis())))
}

/// POST /api/requests
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ServiceRequestCreate>,
) -> AppResult<Json<ApiResponse<ServiceRequest>>> {
    Ok(ok(state.requests.create(&user.id, payload)?))
}

/// POST /api/requests/{id}/complete
pub async fn complete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ServiceRequest>>> {
    Ok(ok(state.requests.complete(&user.id, &id)?))
}

/// DELETE /api/requests/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.requests.delete(&user.id, &id)?;
    Ok(Json(ApiResponse::ok()))
}

/// GET /api/requests/history
pub async fn history(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<ApiResponse<Vec<RequestCard>>>> {
    let requests = state.requests.history(&user.id, (&query).into())?;
    Ok(ok(to_cards(requests, state.clock.now_millis())))
}

/// GET /api/requests/insights
pub async fn insights(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<ApiResponse<RequestInsights>>> {
    Ok(ok(state.requests.insights(&user.id, (&query).into())?))
}

/// GET /api/floor
pub async fn floor_status(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<TableStatusView>>>> {
    Ok(ok(state.requests.floor_status(&user.id)?))
}
