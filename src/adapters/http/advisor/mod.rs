//! HTTP adapter for advisor endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerRequest, AssistanceResponse, CatalogResponse, DispatchResponse, ErrorResponse,
    HealthResponse, SessionResponse, TransitionResponse,
};
pub use handlers::{get_catalog, health, AdvisorHandlers};
pub use routes::advisor_routes;
