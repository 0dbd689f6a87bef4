use lazy_static::lazy_static;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::identity::dto::{
    AuthStatus, CreateTrainerRequest, RegisterClientRequest, TelegramAuthRequest,
};
use crate::identity::repo_types::{Client, NewClient, NewUser, Role, Trainer, User};

const INVITE_CODE_LEN: usize = 8;

pub(crate) fn is_valid_invite_code(code: &str) -> bool {
    lazy_static! {
        static ref INVITE_RE: Regex = Regex::new(r"^[A-Za-z0-9]{3,16}$").unwrap();
    }
    INVITE_RE.is_match(code)
}

pub(crate) fn generate_invite_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_CODE_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// Loads `user_id` and checks it holds `role`. A missing user is treated the
/// same as a wrong role.
pub async fn require_role(db: &SqlitePool, user_id: i64, role: Role) -> ApiResult<User> {
    match User::find_by_id(db, user_id).await? {
        Some(user) if user.role == role => Ok(user),
        Some(user) => {
            warn!(user_id, have = ?user.role, need = ?role, "role gate rejected");
            Err(ApiError::Forbidden)
        }
        None => {
            warn!(user_id, need = ?role, "role gate rejected unknown user");
            Err(ApiError::Forbidden)
        }
    }
}

/// Resolves a telegram identity to a user id, creating a client account on
/// first contact. Existing rows are returned untouched. Every step is a single
/// statement, so concurrent first contacts converge on one row.
pub async fn authenticate(
    db: &SqlitePool,
    req: &TelegramAuthRequest,
    now: &str,
) -> ApiResult<(AuthStatus, i64)> {
    let telegram_id = req.telegram_id.as_str();
    if telegram_id.trim().is_empty() {
        return Err(ApiError::invalid("telegram_id must not be empty"));
    }

    let new = NewUser {
        telegram_id,
        username: req.username.as_deref(),
        full_name: req.full_name.as_deref(),
        phone: req.phone.as_deref(),
        role: Role::Client,
    };
    if let Some(id) = User::insert_if_absent(db, &new, now).await? {
        info!(user_id = id, "user created from telegram identity");
        return Ok((AuthStatus::Created, id));
    }
    if let Some(user) = User::find_by_telegram_id(db, telegram_id).await? {
        debug!(user_id = user.id, "known telegram identity");
        return Ok((AuthStatus::Ok, user.id));
    }

    // nothing written and no row for this identity: the username is taken
    warn!(username = ?new.username, "username already in use, storing user without it");
    let new = NewUser { username: None, ..new };
    if let Some(id) = User::insert_if_absent(db, &new, now).await? {
        info!(user_id = id, "user created from telegram identity");
        return Ok((AuthStatus::Created, id));
    }
    let user = User::find_by_telegram_id(db, telegram_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("telegram identity neither inserted nor found"))?;
    Ok((AuthStatus::Ok, user.id))
}

/// Binds a client to the trainer owning `invite_code`, overwriting any
/// previous trainer.
pub async fn link_trainer(db: &SqlitePool, client_id: i64, invite_code: &str) -> ApiResult<i64> {
    if let Some(trainer_id) = Client::link_by_invite_code(db, invite_code, client_id).await? {
        info!(client_id, trainer_id, "client linked");
        return Ok(trainer_id);
    }

    if Trainer::find_by_invite_code(db, invite_code).await?.is_none() {
        return Err(ApiError::not_found("Trainer not found"));
    }
    Err(ApiError::not_found("Client not found"))
}

/// Creates a trainer account and profile in one transaction.
pub async fn create_trainer(
    db: &SqlitePool,
    req: &CreateTrainerRequest,
    now: &str,
) -> ApiResult<(i64, String)> {
    let telegram_id = req.telegram_id.as_str();
    if telegram_id.trim().is_empty() {
        return Err(ApiError::invalid("telegram_id must not be empty"));
    }
    let invite_code = match &req.invite_code {
        Some(code) if !is_valid_invite_code(code) => {
            return Err(ApiError::invalid(
                "invite_code must be 3-16 latin letters or digits",
            ))
        }
        Some(code) => code.clone(),
        None => generate_invite_code(),
    };

    // the first statement writes, so the lock is taken before anything is read
    let mut tx = db.begin().await?;
    let new = NewUser {
        telegram_id,
        username: req.username.as_deref(),
        full_name: req.full_name.as_deref(),
        phone: req.phone.as_deref(),
        role: Role::Trainer,
    };
    let id = User::create(&mut *tx, &new, now).await?;
    Trainer::create(
        &mut *tx,
        id,
        req.bio.as_deref(),
        req.specialization.as_deref(),
        &invite_code,
    )
    .await?;
    tx.commit().await?;

    info!(trainer_id = id, "trainer created");
    Ok((id, invite_code))
}

/// Creates the client profile of an existing client-role user.
pub async fn register_client(
    db: &SqlitePool,
    req: &RegisterClientRequest,
    now: &str,
) -> ApiResult<(i64, i64)> {
    let new = NewClient {
        user_id: req.user_id,
        invite_code: &req.invite_code,
        goal: req.goal.as_deref(),
        height: req.height,
        dob: req.dob.as_deref(),
    };
    if let Some(trainer_id) = Client::register(db, &new, now).await? {
        info!(client_id = req.user_id, trainer_id, "client registered");
        return Ok((req.user_id, trainer_id));
    }

    let user = User::find_by_id(db, req.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    if user.role != Role::Client {
        warn!(user_id = user.id, role = ?user.role, "only client accounts get a client profile");
        return Err(ApiError::Forbidden);
    }
    if Client::find_by_id(db, user.id).await?.is_some() {
        return Err(ApiError::Conflict("Client already registered".into()));
    }
    Err(ApiError::not_found("Trainer not found"))
}

pub async fn list_clients(db: &SqlitePool, trainer_id: i64) -> ApiResult<Vec<Client>> {
    Ok(Client::list_by_trainer(db, trainer_id).await?)
}
