use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

use super::dto::{PurchaseRequest, PurchaseResponse, StatusQuery, StatusResponse};
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscription/purchase", post(purchase))
        .route("/subscription/status", get(status))
}

#[instrument(skip(state, payload), fields(client_id = payload.client_id))]
pub async fn purchase(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PurchaseRequest>,
) -> ApiResult<Json<PurchaseResponse>> {
    let subscription_id = services::purchase(&state.db, &payload).await?;
    Ok(Json(PurchaseResponse {
        status: "created",
        subscription_id,
    }))
}

#[instrument(skip(state))]
pub async fn status(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<StatusQuery>,
) -> ApiResult<Json<StatusResponse>> {
    let res = match services::active_subscription(&state.db, q.client_id).await? {
        Some(sub) => StatusResponse::Active {
            subscription: sub.into(),
        },
        None => StatusResponse::None,
    };
    Ok(Json(res))
}
