use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    identity::{
        dto::{
            AuthResponse, CallerQuery, ClientItem, ClientsQuery,
            CreateTrainerRequest, CreateTrainerResponse, LinkTrainerRequest,
            LinkTrainerResponse, RegisterClientRequest, RegisterClientResponse,
            TelegramAuthRequest,
        },
        repo_types::Role,
        services,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/telegram", post(auth_telegram))
        .route("/link_trainer", post(link_trainer))
}

pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(register_client))
        .route("/trainer/clients", get(trainer_clients))
        .route("/trainers", post(create_trainer))
}

#[instrument(skip(state, payload), fields(telegram_id = %payload.telegram_id))]
pub async fn auth_telegram(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TelegramAuthRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (status, user_id) =
        services::authenticate(&state.db, &payload, &state.clock.now()).await?;
    Ok(Json(AuthResponse { status, user_id }))
}

#[instrument(skip(state, payload), fields(client_id = payload.client_id))]
pub async fn link_trainer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LinkTrainerRequest>,
) -> ApiResult<Json<LinkTrainerResponse>> {
    let trainer_id =
        services::link_trainer(&state.db, payload.client_id, &payload.invite_code).await?;
    Ok(Json(LinkTrainerResponse {
        status: "linked",
        trainer_id,
    }))
}

/// Admin only.
#[instrument(skip(state, payload))]
pub async fn create_trainer(
    State(state): State<AppState>,
    ApiQuery(caller): ApiQuery<CallerQuery>,
    ApiJson(payload): ApiJson<CreateTrainerRequest>,
) -> ApiResult<(StatusCode, Json<CreateTrainerResponse>)> {
    let admin = services::require_role(&state.db, caller.user_id, Role::Admin).await?;
    let (trainer_id, invite_code) =
        services::create_trainer(&state.db, &payload, &state.clock.now()).await?;
    info!(admin_id = admin.id, trainer_id, "trainer account issued");
    Ok((
        StatusCode::CREATED,
        Json(CreateTrainerResponse {
            status: "created",
            trainer_id,
            invite_code,
        }),
    ))
}

#[instrument(skip(state, payload), fields(user_id = payload.user_id))]
pub async fn register_client(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterClientRequest>,
) -> ApiResult<(StatusCode, Json<RegisterClientResponse>)> {
    let (client_id, trainer_id) =
        services::register_client(&state.db, &payload, &state.clock.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterClientResponse {
            status: "registered",
            client_id,
            trainer_id,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_clients(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ClientsQuery>,
) -> ApiResult<Json<Vec<ClientItem>>> {
    let clients = services::list_clients(&state.db, q.trainer_id).await?;
    Ok(Json(clients.into_iter().map(ClientItem::from).collect()))
}

/// Trainer only: the caller's own clients.
#[instrument(skip(state))]
pub async fn trainer_clients(
    State(state): State<AppState>,
    ApiQuery(caller): ApiQuery<CallerQuery>,
) -> ApiResult<Json<Vec<ClientItem>>> {
    let trainer = services::require_role(&state.db, caller.user_id, Role::Trainer).await?;
    let clients = services::list_clients(&state.db, trainer.id).await?;
    Ok(Json(clients.into_iter().map(ClientItem::from).collect()))
}
