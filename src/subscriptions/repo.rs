use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteExecutor, FromRow};

pub const STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: i64,
    pub client_id: i64,
    pub trainer_id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub payment_id: Option<String>,
}

pub struct NewSubscription<'a> {
    pub client_id: i64,
    pub trainer_id: i64,
    pub kind: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub payment_id: Option<&'a str>,
}

/// Always inserts with status `active`; earlier subscriptions are left as is.
pub async fn insert_active<'e>(
    db: impl SqliteExecutor<'e>,
    new: &NewSubscription<'_>,
) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO subscriptions (client_id, trainer_id, type, start_date, end_date, status, payment_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(new.client_id)
    .bind(new.trainer_id)
    .bind(new.kind)
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(STATUS_ACTIVE)
    .bind(new.payment_id)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// The newest active subscription of a client, if any.
pub async fn find_active_by_client<'e>(
    db: impl SqliteExecutor<'e>,
    client_id: i64,
) -> sqlx::Result<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, client_id, trainer_id, type, start_date, end_date, status, payment_id
        FROM subscriptions
        WHERE client_id = $1 AND status = $2
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(client_id)
    .bind(STATUS_ACTIVE)
    .fetch_optional(db)
    .await
}
