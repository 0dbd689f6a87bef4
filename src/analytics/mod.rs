//! Freeform analytics events with AND-combined filters on read.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteExecutor, FromRow, QueryBuilder, Sqlite};
use tracing::{debug, instrument};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalyticsEvent {
    pub id: i64,
    pub user_id: i64,
    pub event_type: String,
    pub payload: Option<String>, // opaque, usually JSON text
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub user_id: i64,
    pub event_type: String,
    pub payload: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub status: &'static str,
    pub event_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub user_id: Option<i64>,
    pub event_type: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics/log", post(log_event))
        .route("/analytics", get(query_events))
}

pub async fn insert_event<'e>(db: impl SqliteExecutor<'e>, ev: &EventRequest) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO analytics_events (user_id, event_type, payload, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(ev.user_id)
    .bind(&ev.event_type)
    .bind(&ev.payload)
    .bind(&ev.created_at)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn find_events<'e>(
    db: impl SqliteExecutor<'e>,
    filter: &EventFilter,
) -> sqlx::Result<Vec<AnalyticsEvent>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, user_id, event_type, payload, created_at FROM analytics_events WHERE 1 = 1",
    );
    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(event_type) = &filter.event_type {
        qb.push(" AND event_type = ").push_bind(event_type.clone());
    }
    qb.push(" ORDER BY id");
    qb.build_query_as::<AnalyticsEvent>().fetch_all(db).await
}

#[instrument(skip(state, payload), fields(user_id = payload.user_id, event_type = %payload.event_type))]
pub async fn log_event(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<EventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let event_id = insert_event(&state.db, &payload).await?;
    debug!(event_id, "analytics event stored");
    Ok(Json(EventResponse {
        status: "logged",
        event_id,
    }))
}

#[instrument(skip(state))]
pub async fn query_events(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<EventFilter>,
) -> ApiResult<Json<Vec<AnalyticsEvent>>> {
    Ok(Json(find_events(&state.db, &filter).await?))
}
