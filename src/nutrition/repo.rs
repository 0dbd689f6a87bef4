use sqlx::sqlite::SqliteExecutor;

use super::repo_types::{FoodLog, NewFoodLog, ProgressTotals};

pub async fn insert_food_log<'e>(
    db: impl SqliteExecutor<'e>,
    log: &NewFoodLog<'_>,
) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO food_logs (client_id, date, calories, protein, fat, carbs, raw_input)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(log.client_id)
    .bind(log.date)
    .bind(log.calories)
    .bind(log.protein)
    .bind(log.fat)
    .bind(log.carbs)
    .bind(log.raw_input)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn list_by_client<'e>(
    db: impl SqliteExecutor<'e>,
    client_id: i64,
) -> sqlx::Result<Vec<FoodLog>> {
    sqlx::query_as::<_, FoodLog>(
        r#"
        SELECT id, client_id, date, calories, protein, fat, carbs, raw_input
        FROM food_logs
        WHERE client_id = $1
        ORDER BY id
        "#,
    )
    .bind(client_id)
    .fetch_all(db)
    .await
}

/// Sums every log of the client; missing nutrients count as zero.
pub async fn totals_by_client<'e>(
    db: impl SqliteExecutor<'e>,
    client_id: i64,
) -> sqlx::Result<ProgressTotals> {
    sqlx::query_as::<_, ProgressTotals>(
        r#"
        SELECT COALESCE(SUM(COALESCE(calories, 0)), 0) AS total_calories,
               COALESCE(SUM(COALESCE(protein, 0)), 0)  AS total_protein,
               COALESCE(SUM(COALESCE(fat, 0)), 0)      AS total_fat,
               COALESCE(SUM(COALESCE(carbs, 0)), 0)    AS total_carbs,
               COUNT(*)                                AS days_logged
        FROM food_logs
        WHERE client_id = $1
        "#,
    )
    .bind(client_id)
    .fetch_one(db)
    .await
}
