//! HTTP handlers for advisor endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::{
    DiscardSessionCommand, DiscardSessionHandler, DispatchSettings, GetSessionHandler,
    GetSessionQuery, RequestAssistanceCommand, RequestAssistanceHandler, StartSessionHandler,
    SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::advisor::AdvisorError;
use crate::domain::foundation::SessionId;
use crate::ports::{CompletionClient, SessionStore};

use super::dto::{
    AnswerRequest, AssistanceResponse, CatalogResponse, ErrorResponse, HealthResponse,
    SessionResponse, TransitionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdvisorHandlers {
    start_handler: Arc<StartSessionHandler>,
    submit_handler: Arc<SubmitAnswerHandler>,
    get_handler: Arc<GetSessionHandler>,
    assist_handler: Arc<RequestAssistanceHandler>,
    discard_handler: Arc<DiscardSessionHandler>,
}

impl AdvisorHandlers {
    /// Wires every advisor handler to the same store and client.
    pub fn new(
        store: Arc<dyn SessionStore>,
        client: Arc<dyn CompletionClient>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            start_handler: Arc::new(StartSessionHandler::new(store.clone())),
            submit_handler: Arc::new(SubmitAnswerHandler::new(store.clone())),
            get_handler: Arc::new(GetSessionHandler::new(store.clone())),
            assist_handler: Arc::new(RequestAssistanceHandler::new(
                store.clone(),
                client,
                settings,
            )),
            discard_handler: Arc::new(DiscardSessionHandler::new(store)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/catalog - Option catalogs and page copy
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse::build())
}

/// POST /api/advisor/sessions - Start a new session
pub async fn start_session(State(handlers): State<AdvisorHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(session) => (
            StatusCode::CREATED,
            Json(SessionResponse::from(&session)),
        )
            .into_response(),
        Err(e) => handle_advisor_error(e),
    }
}

/// GET /api/advisor/sessions/:id - Get session state
pub async fn get_session(
    State(handlers): State<AdvisorHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_advisor_error(e),
    }
}

/// POST /api/advisor/sessions/:id/answers - Answer a question
pub async fn submit_answer(
    State(handlers): State<AdvisorHandlers>,
    Path(session_id): Path<String>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response()
        }
    };

    let cmd = SubmitAnswerCommand {
        session_id,
        answer: req.into(),
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(TransitionResponse::from(result))).into_response(),
        Err(e) => handle_advisor_error(e),
    }
}

/// POST /api/advisor/sessions/:id/assist - Get AI assistance
pub async fn request_assistance(
    State(handlers): State<AdvisorHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .assist_handler
        .handle(RequestAssistanceCommand { session_id })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(AssistanceResponse::from(result))).into_response(),
        Err(e) => handle_advisor_error(e),
    }
}

/// DELETE /api/advisor/sessions/:id - Discard a session
pub async fn discard_session(
    State(handlers): State<AdvisorHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .discard_handler
        .handle(DiscardSessionCommand { session_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_advisor_error(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_advisor_error(error: AdvisorError) -> Response {
    let details = json!({ "error_code": error.code().to_string() });
    match error {
        AdvisorError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string()).with_details(details)),
        )
            .into_response(),
        AdvisorError::NotReady(_)
        | AdvisorError::DispatchInProgress
        | AdvisorError::VersionConflict
        | AdvisorError::InvalidState(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(error.message()).with_details(details)),
        )
            .into_response(),
        AdvisorError::Store(_) | AdvisorError::Internal(_) => {
            error!(error = %error, "Advisor request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(error.message())),
            )
                .into_response()
        }
    }
}
