use sqlx::SqlitePool;
use tracing::info;

use crate::error::ApiResult;

use super::dto::PurchaseRequest;
use super::repo::{self, NewSubscription, Subscription};

pub async fn purchase(db: &SqlitePool, req: &PurchaseRequest) -> ApiResult<i64> {
    let new = NewSubscription {
        client_id: req.client_id,
        trainer_id: req.trainer_id,
        kind: &req.kind,
        start_date: &req.start_date,
        end_date: &req.end_date,
        payment_id: req.payment_id.as_deref(),
    };
    let id = repo::insert_active(db, &new).await?;
    info!(subscription_id = id, client_id = req.client_id, kind = %req.kind, "subscription purchased");
    Ok(id)
}

/// When several rows are active the most recent purchase wins.
pub async fn active_subscription(db: &SqlitePool, client_id: i64) -> ApiResult<Option<Subscription>> {
    Ok(repo::find_active_by_client(db, client_id).await?)
}
