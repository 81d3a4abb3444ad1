pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless classifier
        .route(
            "/api/v1/assessment/preview",
            post(assessment::handle_preview),
        )
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/answers",
            put(sessions::handle_set_answers),
        )
        .route("/api/v1/sessions/:id/cv", post(sessions::handle_upload_cv))
        .route(
            "/api/v1/sessions/:id/purchase",
            post(sessions::handle_purchase),
        )
        .route("/api/v1/sessions/:id/reset", post(sessions::handle_reset))
        .route(
            "/api/v1/sessions/:id/results/free",
            get(sessions::handle_free_result),
        )
        .route(
            "/api/v1/sessions/:id/results/paid",
            get(sessions::handle_paid_result),
        )
        .route("/api/v1/sessions/:id/watch", get(sessions::handle_watch))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn green_answers() -> Value {
        json!({
            "role_target": "same-role",
            "last_work_timing": "less-than-6-months",
            "urgency": "flexible",
            "work_examples": "real-production",
            "main_blocker": "not-getting-interviews"
        })
    }

    async fn create_session(app: &Router) -> String {
        let (status, body) = send(app, empty("POST", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), empty("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["active_sessions"], 0);
    }

    #[tokio::test]
    async fn test_preview_green_scenario() {
        let (status, body) = send(
            &app(),
            json_request("POST", "/api/v1/assessment/preview", green_answers()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "green");
        assert_eq!(body["matched_rule"], "ready-same-track");
        assert!(body.get("weekly_plan").is_none());
    }

    #[tokio::test]
    async fn test_preview_rejects_unknown_answer() {
        let mut answers = green_answers();
        answers["urgency"] = json!("yesterday");
        let (status, body) = send(
            &app(),
            json_request("POST", "/api/v1/assessment/preview", answers),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("urgency"));
    }

    #[tokio::test]
    async fn test_malformed_session_id_is_validation_error() {
        let (status, body) = send(&app(), empty("GET", "/api/v1/sessions/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_set_answers_with_missing_field_is_validation_error() {
        let app = app();
        let id = create_session(&app).await;
        let mut answers = green_answers();
        answers.as_object_mut().unwrap().remove("main_blocker");
        let (status, body) = send(
            &app,
            json_request("PUT", &format!("/api/v1/sessions/{id}/answers"), answers),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_watch_with_bad_query_is_validation_error() {
        let app = app();
        let id = create_session(&app).await;
        let (status, body) = send(
            &app,
            empty("GET", &format!("/api/v1/sessions/{id}/watch?after=soon")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_session_lifecycle_with_paywall() {
        let app = app();
        let id = create_session(&app).await;

        let free_uri = format!("/api/v1/sessions/{id}/results/free");
        let paid_uri = format!("/api/v1/sessions/{id}/results/paid");

        let (status, _) = send(&app, empty("GET", &free_uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, view) = send(
            &app,
            json_request("PUT", &format!("/api/v1/sessions/{id}/answers"), green_answers()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["free_result"]["status"], "green");
        assert!(view["paid_result"].is_null());

        let (status, body) = send(&app, empty("GET", &paid_uri)).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"]["code"], "PAYMENT_REQUIRED");

        let (status, view) =
            send(&app, empty("POST", &format!("/api/v1/sessions/{id}/purchase"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["is_paid"], true);

        let (status, free) = send(&app, empty("GET", &free_uri)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, paid) = send(&app, empty("GET", &paid_uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(paid["weekly_plan"].as_array().unwrap().len(), 4);
        assert_eq!(paid["cv_rewrite_bullets"].as_array().unwrap().len(), 5);
        for key in ["status", "status_explanation", "blockers", "teaser_action"] {
            assert_eq!(paid[key], free[key], "field {key}");
        }

        let (status, view) =
            send(&app, empty("POST", &format!("/api/v1/sessions/{id}/reset"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["is_paid"], false);
        assert!(view["free_result"].is_null());
        let (status, _) = send(&app, empty("GET", &free_uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_paid_before_answers_is_not_found_once_paid() {
        let app = app();
        let id = create_session(&app).await;
        send(&app, empty("POST", &format!("/api/v1/sessions/{id}/purchase"))).await;
        let (status, _) = send(
            &app,
            empty("GET", &format!("/api/v1/sessions/{id}/results/paid")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app(), empty("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _) = send(&app, empty("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, empty("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_limit() {
        let app = build_router(AppState::new(Config {
            max_sessions: 1,
            ..Config::default()
        }));
        create_session(&app).await;
        let (status, body) = send(&app, empty("POST", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SESSION_LIMIT");
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_frees_limit() {
        let app = build_router(AppState::new(Config {
            max_sessions: 1,
            session_idle_ttl_secs: 60,
            ..Config::default()
        }));
        let abandoned = create_session(&app).await;
        let (status, _) = send(&app, empty("POST", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        tokio::time::advance(std::time::Duration::from_secs(61)).await;
        create_session(&app).await;
        let (status, _) = send(
            &app,
            empty("GET", &format!("/api/v1/sessions/{abandoned}")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cv_upload() {
        let app = app();
        let id = create_session(&app).await;
        let boundary = "READINESSBOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Backend engineer. Shipped payments API.\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/sessions/{id}/cv"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, view) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["cv"]["filename"], "cv.txt");
        assert_eq!(view["cv"]["characters"], 39);
        assert!(view["free_result"].is_null());
    }

    #[tokio::test]
    async fn test_cv_upload_without_file_field() {
        let app = app();
        let id = create_session(&app).await;
        let boundary = "READINESSBOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"note\"\r\n\r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/sessions/{id}/cv"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_watch_times_out_without_change() {
        let app = app();
        let id = create_session(&app).await;
        let (status, body) = send(
            &app,
            empty("GET", &format!("/api/v1/sessions/{id}/watch?timeout_ms=10")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], false);
        assert_eq!(body["session"]["revision"], 0);
    }

    #[tokio::test]
    async fn test_watch_returns_newer_revision() {
        let app = app();
        let id = create_session(&app).await;
        send(
            &app,
            json_request("PUT", &format!("/api/v1/sessions/{id}/answers"), green_answers()),
        )
        .await;
        let (status, body) = send(
            &app,
            empty(
                "GET",
                &format!("/api/v1/sessions/{id}/watch?after=0&timeout_ms=1000"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);
        assert_eq!(body["session"]["revision"], 1);
        assert_eq!(body["session"]["free_result"]["status"], "green");
    }

    #[tokio::test]
    async fn test_watch_wakes_on_concurrent_change() {
        let state = AppState::new(Config::default());
        let app = build_router(state.clone());
        let store = state.sessions.create().await.unwrap();
        let id = store.id();

        let waiter = tokio::spawn({
            let app = app.clone();
            async move {
                send(
                    &app,
                    empty(
                        "GET",
                        &format!("/api/v1/sessions/{id}/watch?after=0&timeout_ms=5000"),
                    ),
                )
                .await
            }
        });
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        store.mark_as_paid();

        let (status, body) = waiter.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);
        assert_eq!(body["session"]["is_paid"], true);
    }
}
