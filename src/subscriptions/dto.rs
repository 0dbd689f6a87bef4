use serde::{Deserialize, Serialize};

use super::repo::Subscription;

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub client_id: i64,
    pub trainer_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub payment_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub status: &'static str,
    pub subscription_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub client_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    pub id: i64,
    pub trainer_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub payment_id: Option<String>,
}

impl From<Subscription> for SubscriptionView {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id,
            trainer_id: s.trainer_id,
            kind: s.kind,
            start_date: s.start_date,
            end_date: s.end_date,
            payment_id: s.payment_id,
        }
    }
}

/// `{"status":"none"}` or `{"status":"active","subscription":{..}}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusResponse {
    None,
    Active { subscription: SubscriptionView },
}
