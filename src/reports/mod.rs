//! Per-trainer activity counters.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::{error::ApiResult, extract::ApiQuery, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub trainer_id: i64,
    /// Accepted for compatibility; counts always cover all history.
    #[allow(dead_code)]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainerSummary {
    pub client_count: i64,
    pub visit_count: i64,
    pub foodlog_count: i64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/reports/summary", get(summary))
}

/// Counts the trainer's clients and the visits and food logs of those
/// clients. The log tables are not touched when there are no clients.
pub async fn trainer_summary(db: &SqlitePool, trainer_id: i64) -> ApiResult<TrainerSummary> {
    let mut tx = db.begin().await?;

    let (client_count,): (i64,) =
        sqlx::query_as(r#"SELECT COUNT(*) FROM clients WHERE trainer_id = $1"#)
            .bind(trainer_id)
            .fetch_one(&mut *tx)
            .await?;
    if client_count == 0 {
        debug!(trainer_id, "no clients, skipping log counts");
        return Ok(TrainerSummary {
            client_count: 0,
            visit_count: 0,
            foodlog_count: 0,
        });
    }

    let (visit_count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM visits
        WHERE client_id IN (SELECT id FROM clients WHERE trainer_id = $1)
        "#,
    )
    .bind(trainer_id)
    .fetch_one(&mut *tx)
    .await?;
    let (foodlog_count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM food_logs
        WHERE client_id IN (SELECT id FROM clients WHERE trainer_id = $1)
        "#,
    )
    .bind(trainer_id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(TrainerSummary {
        client_count,
        visit_count,
        foodlog_count,
    })
}

#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<SummaryQuery>,
) -> ApiResult<Json<TrainerSummary>> {
    Ok(Json(trainer_summary(&state.db, q.trainer_id).await?))
}
