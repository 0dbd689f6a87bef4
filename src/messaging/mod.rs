//! Append-only user-to-user messages. Nothing here delivers them.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteExecutor, FromRow};
use tracing::instrument;

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub user_from: i64,
    pub user_to: i64,
    pub text: String,
    pub automated: bool,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub user_from: i64,
    pub user_to: i64,
    pub text: String,
    #[serde(default)]
    pub automated: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub user_id: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages/send", post(send_message))
        .route("/messages", get(list_messages))
}

pub async fn insert_message<'e>(
    db: impl SqliteExecutor<'e>,
    msg: &MessageRequest,
) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO messages (user_from, user_to, text, automated, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(msg.user_from)
    .bind(msg.user_to)
    .bind(&msg.text)
    .bind(msg.automated)
    .bind(&msg.created_at)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// Messages the user sent or received, oldest first.
pub async fn list_for_user<'e>(db: impl SqliteExecutor<'e>, user_id: i64) -> sqlx::Result<Vec<Message>> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, user_from, user_to, text, automated, created_at
        FROM messages
        WHERE user_from = $1 OR user_to = $1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

#[instrument(skip(state, payload), fields(from = payload.user_from, to = payload.user_to))]
pub async fn send_message(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message_id = insert_message(&state.db, &payload).await?;
    Ok(Json(MessageResponse {
        status: "sent",
        message_id,
    }))
}

#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<MessagesQuery>,
) -> ApiResult<Json<Vec<Message>>> {
    Ok(Json(list_for_user(&state.db, q.user_id).await?))
}
