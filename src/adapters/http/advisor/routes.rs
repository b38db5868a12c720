//! HTTP routes for advisor endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    discard_session, get_session, request_assistance, start_session, submit_answer,
    AdvisorHandlers,
};

/// Creates the advisor session router, to be nested under
/// `/api/advisor/sessions`.
pub fn advisor_routes(handlers: AdvisorHandlers) -> Router {
    Router::new()
        .route("/", post(start_session))
        .route("/:id", get(get_session).delete(discard_session))
        .route("/:id/answers", post(submit_answer))
        .route("/:id/assist", post(request_assistance))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionClient;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::DispatchSettings;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(client: MockCompletionClient) -> Router {
        let handlers = AdvisorHandlers::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(client),
            DispatchSettings::default(),
        );
        Router::new().nest("/sessions", advisor_routes(handlers))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_returns_session_at_goal_stage() {
        let app = app(MockCompletionClient::new());
        let (status, body) = send(&app, "POST", "/sessions", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["stage"], "await_goal");
        assert_eq!(body["heading"], "Step 1: Identify Your Main Goal");
        assert_eq!(body["dispatch_in_flight"], false);
    }

    #[tokio::test]
    async fn answer_advances_stage() {
        let app = app(MockCompletionClient::new());
        let id = create(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/sessions/{}/answers", id),
            Some(serde_json::json!({"stage": "goal", "goal": "analyze_insights"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted"], true);
        assert_eq!(body["stage"], "await_data_availability");
        assert_eq!(body["session"]["answers"]["goal"], "analyze_insights");
    }

    #[tokio::test]
    async fn invalid_answer_is_200_with_warning() {
        let app = app(MockCompletionClient::new());
        let id = create(&app).await;
        let uri = format!("/sessions/{}/answers", id);
        send(
            &app,
            "POST",
            &uri,
            Some(serde_json::json!({"stage": "goal", "goal": "create_content"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            &uri,
            Some(serde_json::json!({"stage": "content_type", "content_type": "other", "other": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted"], false);
        assert_eq!(body["notice"]["level"], "warning");
        assert_eq!(body["notice"]["message"], "Please specify the content type.");
    }

    #[tokio::test]
    async fn malformed_answer_body_is_400() {
        let app = app(MockCompletionClient::new());
        let id = create(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/sessions/{}/answers", id),
            Some(serde_json::json!({"stage": "goal", "goal": "rule_the_world"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn assist_before_ready_is_409() {
        let app = app(MockCompletionClient::new());
        let id = create(&app).await;

        let (status, body) = send(&app, "POST", &format!("/sessions/{}/assist", id), None).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["details"]["error_code"], "INVALID_STATE_TRANSITION");
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let app = app(MockCompletionClient::new());
        let (status, body) = send(
            &app,
            "GET",
            "/sessions/7f0c2a4e-8a53-4d8e-9d7a-5f0e3c1b2a90",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn invalid_session_id_is_400() {
        let app = app(MockCompletionClient::new());
        let (status, _) = send(&app, "GET", "/sessions/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_discards_session() {
        let app = app(MockCompletionClient::new());
        let id = create(&app).await;
        let uri = format!("/sessions/{}", id);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
