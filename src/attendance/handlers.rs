use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

use super::dto::{CheckInRequest, CheckInResponse, VisitItem};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/:client_id/checkin", post(check_in))
        .route("/clients/:client_id/attendance_history", get(attendance_history))
}

#[instrument(skip(state, payload))]
pub async fn check_in(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<CheckInRequest>,
) -> ApiResult<Json<CheckInResponse>> {
    let visit_id = repo::insert_visit(
        &state.db,
        client_id,
        payload.trainer_id,
        &payload.date,
        payload.status,
        payload.note.as_deref(),
    )
    .await?;
    info!(visit_id, client_id, status = ?payload.status, "visit recorded");
    Ok(Json(CheckInResponse {
        status: "checked_in",
        visit_id,
    }))
}

#[instrument(skip(state))]
pub async fn attendance_history(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<VisitItem>>> {
    let visits = repo::list_by_client(&state.db, client_id).await?;
    Ok(Json(visits.into_iter().map(VisitItem::from).collect()))
}
