use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

use super::dto::{FoodLogItem, FoodLogRequest, FoodLogResponse};
use super::repo_types::ProgressTotals;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foodlog", post(log_food))
        .route("/clients/:client_id/foodlogs", get(list_food_logs))
        .route("/clients/:client_id/progress", get(progress))
}

#[instrument(skip(state, payload), fields(client_id = payload.client_id))]
pub async fn log_food(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<FoodLogRequest>,
) -> ApiResult<Json<FoodLogResponse>> {
    let food_log_id = services::log_food(&state.db, &payload).await?;
    Ok(Json(FoodLogResponse {
        status: "logged",
        food_log_id,
    }))
}

#[instrument(skip(state))]
pub async fn list_food_logs(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<FoodLogItem>>> {
    let logs = services::food_logs(&state.db, client_id).await?;
    Ok(Json(logs.into_iter().map(FoodLogItem::from).collect()))
}

#[instrument(skip(state))]
pub async fn progress(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
) -> ApiResult<Json<ProgressTotals>> {
    Ok(Json(services::progress(&state.db, client_id).await?))
}
