use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    identity::{dto::CallerQuery, repo_types::Role, services::require_role},
    state::AppState,
};

use super::dto::{KnowledgeAnswer, KnowledgeQueryRequest, NewEntryRequest, NewEntryResponse};
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/knowledge/query", post(query))
        .route("/knowledge", post(add_entry))
}

#[instrument(skip(state, payload), fields(trainer_id = payload.trainer_id))]
pub async fn query(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<KnowledgeQueryRequest>,
) -> ApiResult<Json<KnowledgeAnswer>> {
    let res = services::answer(&state.db, payload.trainer_id, &payload.question).await?;
    Ok(Json(res))
}

/// Trainer only; the entry is scoped to the calling trainer.
#[instrument(skip(state, payload))]
pub async fn add_entry(
    State(state): State<AppState>,
    ApiQuery(caller): ApiQuery<CallerQuery>,
    ApiJson(payload): ApiJson<NewEntryRequest>,
) -> ApiResult<(StatusCode, Json<NewEntryResponse>)> {
    let trainer = require_role(&state.db, caller.user_id, Role::Trainer).await?;
    let entry_id = services::add_entry(&state.db, trainer.id, &payload).await?;
    info!(entry_id, trainer_id = trainer.id, "faq entry added");
    Ok((
        StatusCode::CREATED,
        Json(NewEntryResponse {
            status: "created",
            entry_id,
        }),
    ))
}
