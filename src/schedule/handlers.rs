use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

use super::dto::{ScheduleQuery, ScheduleRequest, ScheduleResponse};
use super::repo::{self, NewSlot, Slot, SlotFilter};

pub fn routes() -> Router<AppState> {
    Router::new().route("/schedule", get(list_schedule).post(create_schedule))
}

#[instrument(skip(state, payload), fields(trainer_id = payload.trainer_id))]
pub async fn create_schedule(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ScheduleRequest>,
) -> ApiResult<Json<ScheduleResponse>> {
    if matches!(payload.capacity, Some(c) if c < 0) {
        return Err(ApiError::invalid("capacity must not be negative"));
    }
    let slot = NewSlot {
        trainer_id: payload.trainer_id,
        date_time: &payload.date_time,
        capacity: payload.capacity,
        place: payload.place.as_deref(),
        created_by: payload.created_by,
    };
    let schedule_id = repo::insert_slot(&state.db, &slot).await?;
    info!(schedule_id, "slot created");
    Ok(Json(ScheduleResponse {
        status: "created",
        schedule_id,
    }))
}

#[instrument(skip(state))]
pub async fn list_schedule(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ScheduleQuery>,
) -> ApiResult<Json<Vec<Slot>>> {
    let filter = SlotFilter {
        trainer_id: q.trainer_id,
        client_id: q.client_id,
    };
    Ok(Json(repo::list_slots(&state.db, filter).await?))
}
