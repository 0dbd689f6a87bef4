use serde::{Deserialize, Serialize};

use crate::identity::repo_types::Client;

/// Body of `POST /auth/telegram`.
#[derive(Debug, Deserialize)]
pub struct TelegramAuthRequest {
    pub telegram_id: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[allow(dead_code)]
    pub language_code: Option<String>, // accepted, not stored
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Ok,
    Created,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: AuthStatus,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LinkTrainerRequest {
    pub client_id: i64,
    pub invite_code: String,
}

#[derive(Debug, Serialize)]
pub struct LinkTrainerResponse {
    pub status: &'static str,
    pub trainer_id: i64,
}

/// Body of `POST /trainers`. A missing invite code is generated.
#[derive(Debug, Deserialize)]
pub struct CreateTrainerRequest {
    pub telegram_id: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    pub invite_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTrainerResponse {
    pub status: &'static str,
    pub trainer_id: i64,
    pub invite_code: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterClientRequest {
    pub user_id: i64,
    pub invite_code: String,
    pub goal: Option<String>,
    pub height: Option<i64>,
    pub dob: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterClientResponse {
    pub status: &'static str,
    pub client_id: i64,
    pub trainer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ClientsQuery {
    pub trainer_id: i64,
}

/// Identity of the caller for role-gated endpoints.
#[derive(Debug, Deserialize)]
pub struct CallerQuery {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ClientItem {
    pub id: i64,
    pub goal: Option<String>,
    pub height: Option<i64>,
    pub dob: Option<String>,
    pub created_at: Option<String>,
}

impl From<Client> for ClientItem {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            goal: c.goal,
            height: c.height,
            dob: c.dob,
            created_at: c.created_at,
        }
    }
}
