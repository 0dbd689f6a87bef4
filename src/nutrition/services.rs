use sqlx::SqlitePool;
use tracing::debug;

use crate::error::ApiResult;

use super::dto::FoodLogRequest;
use super::repo;
use super::repo_types::{FoodLog, NewFoodLog, ProgressTotals};

pub async fn log_food(db: &SqlitePool, req: &FoodLogRequest) -> ApiResult<i64> {
    let new = NewFoodLog {
        client_id: req.client_id,
        date: &req.date,
        calories: req.calories,
        protein: req.protein,
        fat: req.fat,
        carbs: req.carbs,
        raw_input: req.raw_input.as_deref(),
    };
    let id = repo::insert_food_log(db, &new).await?;
    debug!(food_log_id = id, client_id = req.client_id, "food logged");
    Ok(id)
}

pub async fn food_logs(db: &SqlitePool, client_id: i64) -> ApiResult<Vec<FoodLog>> {
    Ok(repo::list_by_client(db, client_id).await?)
}

/// `days_logged` counts log rows, not distinct dates.
pub async fn progress(db: &SqlitePool, client_id: i64) -> ApiResult<ProgressTotals> {
    Ok(repo::totals_by_client(db, client_id).await?)
}
