mod analytics;
mod app;
mod attendance;
mod clock;
mod config;
mod db;
mod error;
mod extract;
mod identity;
mod knowledge;
mod messaging;
mod nutrition;
mod reports;
mod schedule;
mod state;
mod subscriptions;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "fitcoach=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;
    tracing::info!(
        max_connections = app_state.config.max_connections,
        admin_configured = app_state.config.admin_telegram_id.is_some(),
        "state ready"
    );
    let app = app::build_app(app_state);
    app::serve(app).await
}
