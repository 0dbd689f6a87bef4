use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{
    analytics, attendance, identity, knowledge, messaging, nutrition, reports, schedule,
    subscriptions,
};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(identity::router())
                .merge(subscriptions::router())
                .merge(attendance::router())
                .merge(nutrition::router())
                .merge(reports::router())
                .merge(schedule::router())
                .merge(knowledge::router())
                .merge(messaging::router())
                .merge(analytics::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt as _;

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_app(AppState::for_tests().await);
        let (status, body) = call(&app, "GET", "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ok".into()));
    }

    #[tokio::test]
    async fn onboarding_to_active_subscription() {
        let state = AppState::for_tests().await;
        let db = state.db.clone();
        let app = build_app(state);

        let (status, body) =
            call(&app, "POST", "/api/v1/auth/telegram", Some(json!({ "telegram_id": "111" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "created");
        let user_id = body["user_id"].as_i64().unwrap();
        assert_eq!(user_id, 1);

        let (_, body) = call(
            &app,
            "POST",
            "/api/v1/auth/telegram",
            Some(json!({ "telegram_id": "111", "username": "renamed" })),
        )
        .await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["user_id"].as_i64().unwrap(), user_id);

        let admin = crate::db::ensure_admin(&db, "admin", "t0").await.unwrap();
        let (status, body) = call(
            &app,
            "POST",
            &format!("/api/v1/trainers?user_id={admin}"),
            Some(json!({ "telegram_id": "222", "full_name": "Coach", "invite_code": "ABC" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let trainer_id = body["trainer_id"].as_i64().unwrap();
        assert_eq!(body["invite_code"], "ABC");

        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/clients",
            Some(json!({ "user_id": user_id, "invite_code": "ABC", "goal": "run 10k" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/link_trainer",
            Some(json!({ "client_id": user_id, "invite_code": "ABC" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "linked");
        assert_eq!(body["trainer_id"].as_i64().unwrap(), trainer_id);

        let (status, body) = call(
            &app,
            "GET",
            &format!("/api/v1/subscription/status?client_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "none" }));

        let (_, body) = call(
            &app,
            "POST",
            "/api/v1/subscription/purchase",
            Some(json!({
                "client_id": user_id,
                "trainer_id": trainer_id,
                "type": "monthly",
                "start_date": "2025-01-01",
                "end_date": "2025-02-01",
            })),
        )
        .await;
        assert_eq!(body["status"], "created");

        let (_, body) = call(
            &app,
            "GET",
            &format!("/api/v1/subscription/status?client_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(body["status"], "active");
        assert_eq!(body["subscription"]["type"], "monthly");
        assert_eq!(body["subscription"]["trainer_id"].as_i64().unwrap(), trainer_id);

        let (_, body) = call(
            &app,
            "GET",
            &format!("/api/v1/trainer/clients?user_id={trainer_id}"),
            None,
        )
        .await;
        assert_eq!(body[0]["id"].as_i64().unwrap(), user_id);
        assert_eq!(body[0]["goal"], "run 10k");
    }

    #[tokio::test]
    async fn first_user_gets_id_one() {
        let app = build_app(AppState::for_tests().await);
        let (_, body) =
            call(&app, "POST", "/api/v1/auth/telegram", Some(json!({ "telegram_id": "111" }))).await;
        assert_eq!(body, json!({ "status": "created", "user_id": 1 }));
        let (_, body) =
            call(&app, "POST", "/api/v1/auth/telegram", Some(json!({ "telegram_id": "111" }))).await;
        assert_eq!(body, json!({ "status": "ok", "user_id": 1 }));
    }

    #[tokio::test]
    async fn logs_and_reports_over_http() {
        let state = AppState::for_tests().await;
        let trainer = crate::testing::seed_trainer(&state.db, "t1", "ABC").await;
        let client = crate::testing::seed_client(&state.db, "c1", trainer).await;
        let app = build_app(state);

        let (status, body) = call(
            &app,
            "POST",
            &format!("/api/v1/clients/{client}/checkin"),
            Some(json!({ "trainer_id": trainer, "date": "2025-01-01", "status": "present" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "checked_in");

        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/v1/clients/{client}/checkin"),
            Some(json!({ "trainer_id": trainer, "date": "2025-01-02", "status": "late" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = call(
            &app,
            "POST",
            "/api/v1/foodlog",
            Some(json!({ "client_id": client, "date": "2025-01-01", "calories": 400, "protein": 25 })),
        )
        .await;
        assert_eq!(body["status"], "logged");

        let (_, body) = call(&app, "GET", &format!("/api/v1/clients/{client}/progress"), None).await;
        assert_eq!(
            body,
            json!({
                "total_calories": 400,
                "total_protein": 25,
                "total_fat": 0,
                "total_carbs": 0,
                "days_logged": 1,
            })
        );

        let (_, body) = call(
            &app,
            "GET",
            &format!("/api/v1/clients/{client}/attendance_history"),
            None,
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["status"], "present");

        let (_, body) = call(
            &app,
            "GET",
            &format!("/api/v1/reports/summary?trainer_id={trainer}&period=month"),
            None,
        )
        .await;
        assert_eq!(
            body,
            json!({ "client_count": 1, "visit_count": 1, "foodlog_count": 1 })
        );
    }

    #[tokio::test]
    async fn errors_map_to_statuses() {
        let state = AppState::for_tests().await;
        let client_user = crate::testing::seed_user(&state.db, "c1", "client").await;
        let app = build_app(state);

        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/link_trainer",
            Some(json!({ "client_id": 1, "invite_code": "NOPE" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Trainer not found");

        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/v1/trainers?user_id={client_user}"),
            Some(json!({ "telegram_id": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = call(&app, "POST", "/api/v1/link_trainer", Some(json!({ "client_id": 1 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(&app, "GET", "/api/v1/subscription/status", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(&app, "GET", "/api/v1/clients/abc/progress", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn faq_entry_then_query() {
        let state = AppState::for_tests().await;
        let trainer = crate::testing::seed_trainer(&state.db, "t1", "ABC").await;
        let app = build_app(state);

        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/v1/knowledge?user_id={trainer}"),
            Some(json!({ "question": "When is class?", "answer": "At 7." })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = call(
            &app,
            "POST",
            "/api/v1/knowledge/query",
            Some(json!({ "trainer_id": trainer, "question": "When is class?" })),
        )
        .await;
        assert_eq!(body, json!({ "answer": "At 7.", "source": "faq" }));

        let (_, body) = call(
            &app,
            "POST",
            "/api/v1/knowledge/query",
            Some(json!({ "trainer_id": trainer, "question": "Where?" })),
        )
        .await;
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["answer"], "No answer found. Please contact your trainer.");
    }
}
