use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FoodLog {
    pub id: i64,
    pub client_id: i64,
    pub date: String,
    pub calories: Option<i64>,
    pub protein: Option<i64>,
    pub fat: Option<i64>,
    pub carbs: Option<i64>,
    pub raw_input: Option<String>,
}

/// Nutrient fields are independently optional; nothing ties them to `raw_input`.
#[derive(Debug)]
pub struct NewFoodLog<'a> {
    pub client_id: i64,
    pub date: &'a str,
    pub calories: Option<i64>,
    pub protein: Option<i64>,
    pub fat: Option<i64>,
    pub carbs: Option<i64>,
    pub raw_input: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
pub struct ProgressTotals {
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_fat: i64,
    pub total_carbs: i64,
    pub days_logged: i64,
}
