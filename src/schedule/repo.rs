use serde::Serialize;
use sqlx::{sqlite::SqliteExecutor, FromRow, QueryBuilder, Sqlite};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Slot {
    pub id: i64,
    pub trainer_id: i64,
    pub date_time: String,
    pub capacity: Option<i64>,
    pub place: Option<String>,
    pub created_by: i64,
}

pub struct NewSlot<'a> {
    pub trainer_id: i64,
    pub date_time: &'a str,
    pub capacity: Option<i64>,
    pub place: Option<&'a str>,
    pub created_by: i64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SlotFilter {
    pub trainer_id: Option<i64>,
    /// Restricts to slots of the client's current trainer.
    pub client_id: Option<i64>,
}

pub async fn insert_slot<'e>(db: impl SqliteExecutor<'e>, slot: &NewSlot<'_>) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO schedule (trainer_id, date_time, capacity, place, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(slot.trainer_id)
    .bind(slot.date_time)
    .bind(slot.capacity)
    .bind(slot.place)
    .bind(slot.created_by)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn list_slots<'e>(db: impl SqliteExecutor<'e>, filter: SlotFilter) -> sqlx::Result<Vec<Slot>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, trainer_id, date_time, capacity, place, created_by FROM schedule WHERE 1 = 1",
    );
    if let Some(trainer_id) = filter.trainer_id {
        qb.push(" AND trainer_id = ").push_bind(trainer_id);
    }
    if let Some(client_id) = filter.client_id {
        qb.push(" AND trainer_id = (SELECT trainer_id FROM clients WHERE id = ")
            .push_bind(client_id)
            .push(")");
    }
    qb.push(" ORDER BY id");
    qb.build_query_as::<Slot>().fetch_all(db).await
}
