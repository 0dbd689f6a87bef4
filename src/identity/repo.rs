use crate::identity::repo_types::{Client, NewClient, NewUser, Trainer, User};
use sqlx::sqlite::SqliteExecutor;

impl User {
    pub async fn find_by_telegram_id<'e>(
        db: impl SqliteExecutor<'e>,
        telegram_id: &str,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, telegram_id, username, full_name, phone, role, created_at, updated_at
            FROM users
            WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id<'e>(db: impl SqliteExecutor<'e>, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, telegram_id, username, full_name, phone, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a user and return its id. `now` stamps both timestamps.
    pub async fn create<'e>(
        db: impl SqliteExecutor<'e>,
        new: &NewUser<'_>,
        now: &str,
    ) -> sqlx::Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (telegram_id, username, full_name, phone, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(new.telegram_id)
        .bind(new.username)
        .bind(new.full_name)
        .bind(new.phone)
        .bind(new.role)
        .bind(now)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    /// Insert a user unless one of its unique keys is already taken.
    /// Returns `None` when nothing was written.
    pub async fn insert_if_absent<'e>(
        db: impl SqliteExecutor<'e>,
        new: &NewUser<'_>,
        now: &str,
    ) -> sqlx::Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO users (telegram_id, username, full_name, phone, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT DO NOTHING
            RETURNING id
            "#,
        )
        .bind(new.telegram_id)
        .bind(new.username)
        .bind(new.full_name)
        .bind(new.phone)
        .bind(new.role)
        .bind(now)
        .fetch_optional(db)
        .await?;
        Ok(row.map(|(id,)| id))
    }
}

impl Trainer {
    pub async fn find_by_invite_code<'e>(
        db: impl SqliteExecutor<'e>,
        invite_code: &str,
    ) -> sqlx::Result<Option<Trainer>> {
        sqlx::query_as::<_, Trainer>(
            r#"
            SELECT id, bio, specialization, invite_code
            FROM trainers
            WHERE invite_code = $1
            "#,
        )
        .bind(invite_code)
        .fetch_optional(db)
        .await
    }

    pub async fn create<'e>(
        db: impl SqliteExecutor<'e>,
        user_id: i64,
        bio: Option<&str>,
        specialization: Option<&str>,
        invite_code: &str,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trainers (id, bio, specialization, invite_code)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(bio)
        .bind(specialization)
        .bind(invite_code)
        .execute(db)
        .await?;
        Ok(())
    }
}

impl Client {
    pub async fn find_by_id<'e>(db: impl SqliteExecutor<'e>, id: i64) -> sqlx::Result<Option<Client>> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, trainer_id, goal, height, dob, created_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_by_trainer<'e>(
        db: impl SqliteExecutor<'e>,
        trainer_id: i64,
    ) -> sqlx::Result<Vec<Client>> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, trainer_id, goal, height, dob, created_at
            FROM clients
            WHERE trainer_id = $1
            ORDER BY id
            "#,
        )
        .bind(trainer_id)
        .fetch_all(db)
        .await
    }

    /// Create the client profile of a client-role user, bound to the trainer
    /// owning `invite_code`. Writes nothing and returns `None` when the user
    /// is missing, is not a client, already has a profile, or the code is
    /// unknown.
    pub async fn register<'e>(
        db: impl SqliteExecutor<'e>,
        new: &NewClient<'_>,
        now: &str,
    ) -> sqlx::Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO clients (id, trainer_id, goal, height, dob, created_at)
            SELECT u.id, t.id, $1, $2, $3, $4
            FROM users u, trainers t
            WHERE u.id = $5
              AND u.role = 'client'
              AND t.invite_code = $6
              AND NOT EXISTS (SELECT 1 FROM clients c WHERE c.id = u.id)
            RETURNING trainer_id
            "#,
        )
        .bind(new.goal)
        .bind(new.height)
        .bind(new.dob)
        .bind(now)
        .bind(new.user_id)
        .bind(new.invite_code)
        .fetch_optional(db)
        .await?;
        Ok(row.map(|(trainer_id,)| trainer_id))
    }

    /// Point the client at the trainer owning `invite_code`, replacing any
    /// previous link. Returns the new trainer id, or `None` when either side
    /// is missing.
    pub async fn link_by_invite_code<'e>(
        db: impl SqliteExecutor<'e>,
        invite_code: &str,
        client_id: i64,
    ) -> sqlx::Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE clients
            SET trainer_id = (SELECT id FROM trainers WHERE invite_code = $1)
            WHERE id = $2
              AND EXISTS (SELECT 1 FROM trainers WHERE invite_code = $1)
            RETURNING trainer_id
            "#,
        )
        .bind(invite_code)
        .bind(client_id)
        .fetch_optional(db)
        .await?;
        Ok(row.map(|(trainer_id,)| trainer_id))
    }
}
