//! Fixtures shared by the test modules.

use sqlx::SqlitePool;

pub async fn seed_user(db: &SqlitePool, telegram_id: &str, role: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (telegram_id, role, created_at, updated_at) VALUES ($1, $2, '', '') RETURNING id",
    )
    .bind(telegram_id)
    .bind(role)
    .fetch_one(db)
    .await
    .unwrap();
    id
}

pub async fn seed_trainer(db: &SqlitePool, telegram_id: &str, invite_code: &str) -> i64 {
    let id = seed_user(db, telegram_id, "trainer").await;
    sqlx::query("INSERT INTO trainers (id, invite_code) VALUES ($1, $2)")
        .bind(id)
        .bind(invite_code)
        .execute(db)
        .await
        .unwrap();
    id
}

pub async fn seed_client(db: &SqlitePool, telegram_id: &str, trainer_id: i64) -> i64 {
    let id = seed_user(db, telegram_id, "client").await;
    sqlx::query("INSERT INTO clients (id, trainer_id, goal) VALUES ($1, $2, 'fit')")
        .bind(id)
        .bind(trainer_id)
        .execute(db)
        .await
        .unwrap();
    id
}

pub async fn trainer_of(db: &SqlitePool, client_id: i64) -> i64 {
    let (trainer_id,): (i64,) = sqlx::query_as("SELECT trainer_id FROM clients WHERE id = $1")
        .bind(client_id)
        .fetch_one(db)
        .await
        .unwrap();
    trainer_id
}
