use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub trainer_id: i64,
    pub date_time: String,
    pub capacity: Option<i64>,
    pub place: Option<String>,
    pub created_by: i64,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub status: &'static str,
    pub schedule_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    pub trainer_id: Option<i64>,
    pub client_id: Option<i64>,
}
