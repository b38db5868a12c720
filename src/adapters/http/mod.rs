//! HTTP adapters - REST API implementations.
//!
//! The advisor API plus the catalog and health endpoints, wrapped in the
//! tracing, CORS and timeout layers configured for the server.

pub mod advisor;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use advisor::{advisor_routes, AdvisorHandlers};

/// Routes without middleware.
pub fn api_router(handlers: AdvisorHandlers) -> Router {
    Router::new()
        .route("/health", get(advisor::health))
        .route("/api/catalog", get(advisor::get_catalog))
        .nest("/api/advisor/sessions", advisor_routes(handlers))
}

/// The full application router.
pub fn app_router(handlers: AdvisorHandlers, server: &ServerConfig) -> Router {
    api_router(handlers)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Allows the configured origins, or any origin when none are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionClient;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::DispatchSettings;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn handlers() -> AdvisorHandlers {
        AdvisorHandlers::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(MockCompletionClient::new()),
            DispatchSettings::default(),
        )
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app_router(handlers(), &ServerConfig::default());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn catalog_is_served() {
        let app = api_router(handlers());
        let response = app
            .oneshot(Request::builder().uri("/api/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["goals"][0]["key"], "automate_or_predict");
        assert_eq!(body["objectives"][8]["label"], "Other (please specify)");
    }
}
