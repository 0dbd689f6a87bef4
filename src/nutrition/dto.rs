use serde::{Deserialize, Serialize};

use super::repo_types::FoodLog;

#[derive(Debug, Deserialize)]
pub struct FoodLogRequest {
    pub client_id: i64,
    pub date: String,
    pub calories: Option<i64>,
    pub protein: Option<i64>,
    pub fat: Option<i64>,
    pub carbs: Option<i64>,
    pub raw_input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FoodLogResponse {
    pub status: &'static str,
    pub food_log_id: i64,
}

#[derive(Debug, Serialize)]
pub struct FoodLogItem {
    pub id: i64,
    pub date: String,
    pub calories: Option<i64>,
    pub protein: Option<i64>,
    pub fat: Option<i64>,
    pub carbs: Option<i64>,
    pub raw_input: Option<String>,
}

impl From<FoodLog> for FoodLogItem {
    fn from(l: FoodLog) -> Self {
        Self {
            id: l.id,
            date: l.date,
            calories: l.calories,
            protein: l.protein,
            fat: l.fat,
            carbs: l.carbs,
            raw_input: l.raw_input,
        }
    }
}
