use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteExecutor, FromRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VisitStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Visit {
    pub id: i64,
    pub client_id: i64,
    pub trainer_id: i64,
    pub date: String,
    pub status: VisitStatus,
    pub note: Option<String>,
}

pub async fn insert_visit<'e>(
    db: impl SqliteExecutor<'e>,
    client_id: i64,
    trainer_id: i64,
    date: &str,
    status: VisitStatus,
    note: Option<&str>,
) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO visits (client_id, trainer_id, date, status, note)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(client_id)
    .bind(trainer_id)
    .bind(date)
    .bind(status)
    .bind(note)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn list_by_client<'e>(
    db: impl SqliteExecutor<'e>,
    client_id: i64,
) -> sqlx::Result<Vec<Visit>> {
    sqlx::query_as::<_, Visit>(
        r#"
        SELECT id, client_id, trainer_id, date, status, note
        FROM visits
        WHERE client_id = $1
        ORDER BY id
        "#,
    )
    .bind(client_id)
    .fetch_all(db)
    .await
}
