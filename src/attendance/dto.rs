use serde::{Deserialize, Serialize};

use super::repo::{Visit, VisitStatus};

/// Body of `POST /clients/:client_id/checkin`. Only `present` and `absent`
/// are accepted as status.
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub trainer_id: i64,
    pub date: String,
    pub status: VisitStatus,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub status: &'static str,
    pub visit_id: i64,
}

#[derive(Debug, Serialize)]
pub struct VisitItem {
    pub id: i64,
    pub trainer_id: i64,
    pub date: String,
    pub status: VisitStatus,
    pub note: Option<String>,
}

impl From<Visit> for VisitItem {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            trainer_id: v.trainer_id,
            date: v.date,
            status: v.status,
            note: v.note,
        }
    }
}
