use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trainer,
    Client,
}

/// Base identity row. Role is fixed at creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub telegram_id: String,          // external identity from the chat platform
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Trainer profile, keyed by the owning user's id.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trainer {
    pub id: i64,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    pub invite_code: Option<String>,
}

/// Client profile, keyed by the owning user's id.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: i64,
    pub trainer_id: i64,
    pub goal: Option<String>,
    pub height: Option<i64>,
    pub dob: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Clone, Copy)]
pub struct NewUser<'a> {
    pub telegram_id: &'a str,
    pub username: Option<&'a str>,
    pub full_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub role: Role,
}

/// Client profile fields supplied at onboarding.
pub struct NewClient<'a> {
    pub user_id: i64,
    pub invite_code: &'a str,
    pub goal: Option<&'a str>,
    pub height: Option<i64>,
    pub dob: Option<&'a str>,
}
