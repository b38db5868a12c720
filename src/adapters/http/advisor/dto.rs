//! HTTP DTOs for advisor endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.
//! Catalog values travel as their machine keys (`"automate_or_predict"`, `"time_series"`).

use serde::{Deserialize, Serialize};

use crate::application::{AssistanceResult, SubmitAnswerResult};
use crate::domain::advisor::{
    catalog_of, AdvisorSession, Answer, AnswerSet, Branch, BusinessConstraints, ChoiceOption,
    Complexity, ContentType, DataAvailability, DataType, DatasetSize, Goal, Notice, Objective,
    Stage, APP_INTRO, APP_TAGLINE, APP_TITLE, CLOSING_NOTE,
};
use crate::ports::CompletionResult;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One answer, tagged by the question it answers.
///
/// ```json
/// {"stage": "goal", "goal": "create_content"}
/// {"stage": "objectives", "objectives": ["predict", "other"], "other": "route planning"}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum AnswerRequest {
    Goal {
        goal: Goal,
    },
    Description {
        #[serde(default)]
        text: Option<String>,
    },
    DataAvailability {
        available: DataAvailability,
    },
    DataTypes {
        data_types: Vec<DataType>,
    },
    Objectives {
        objectives: Vec<Objective>,
        #[serde(default)]
        other: Option<String>,
    },
    BusinessConstraints {
        #[serde(default)]
        constraints: BusinessConstraints,
    },
    ContentType {
        content_type: ContentType,
        #[serde(default)]
        other: Option<String>,
    },
    Complexity {
        complexity: Complexity,
    },
}

impl From<AnswerRequest> for Answer {
    fn from(req: AnswerRequest) -> Self {
        match req {
            AnswerRequest::Goal { goal } => Answer::Goal(goal),
            AnswerRequest::Description { text } => Answer::Description(text),
            AnswerRequest::DataAvailability { available } => Answer::DataAvailability(available),
            AnswerRequest::DataTypes { data_types } => Answer::DataTypes(data_types),
            AnswerRequest::Objectives { objectives, other } => Answer::Objectives {
                selected: objectives,
                other,
            },
            AnswerRequest::BusinessConstraints { constraints } => {
                Answer::BusinessConstraints(constraints)
            }
            AnswerRequest::ContentType {
                content_type,
                other,
            } => Answer::ContentType {
                selected: content_type,
                other,
            },
            AnswerRequest::Complexity { complexity } => Answer::Complexity(complexity),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Last completed dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    pub prompt: String,
    pub branch: Branch,
    pub outcome: CompletionResult,
    pub finished_at: String,
}

/// Full session view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<&'static str>,
    pub answers: AnswerSet,
    pub dispatch_in_flight: bool,
    pub dispatch_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dispatch: Option<DispatchResponse>,
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AdvisorSession> for SessionResponse {
    fn from(session: &AdvisorSession) -> Self {
        Self {
            id: session.id().to_string(),
            stage: session.stage(),
            heading: session.stage().heading(),
            answers: session.answers().clone(),
            dispatch_in_flight: session.is_dispatch_in_flight(),
            dispatch_count: session.dispatch_count(),
            last_dispatch: session.last_dispatch().map(|record| DispatchResponse {
                prompt: record.prompt.as_str().to_string(),
                branch: record.prompt.branch(),
                outcome: record.result.clone(),
                finished_at: record.finished_at.to_rfc3339(),
            }),
            version: session.version(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// Result of submitting an answer. Rejected answers are reported here with a
/// warning notice, not as an HTTP error.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionResponse {
    pub accepted: bool,
    pub from: Stage,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    pub session: SessionResponse,
}

impl From<SubmitAnswerResult> for TransitionResponse {
    fn from(result: SubmitAnswerResult) -> Self {
        let SubmitAnswerResult {
            transition,
            session,
        } = result;
        Self {
            accepted: transition.accepted,
            from: transition.from,
            stage: transition.stage,
            notice: transition.notice,
            session: SessionResponse::from(&session),
        }
    }
}

/// Prompt that was sent and the backend's outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AssistanceResponse {
    pub session_id: String,
    pub prompt: String,
    pub branch: Branch,
    pub system_instruction: &'static str,
    pub outcome: CompletionResult,
}

impl From<AssistanceResult> for AssistanceResponse {
    fn from(result: AssistanceResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            prompt: result.prompt.as_str().to_string(),
            branch: result.prompt.branch(),
            system_instruction: result.prompt.system_instruction(),
            outcome: result.result,
        }
    }
}

/// All option catalogs plus the page copy.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub title: &'static str,
    pub tagline: &'static str,
    pub intro: &'static str,
    pub closing_note: &'static str,
    pub goals: Vec<ChoiceOption>,
    pub data_availability: Vec<ChoiceOption>,
    pub data_types: Vec<ChoiceOption>,
    pub objectives: Vec<ChoiceOption>,
    pub content_types: Vec<ChoiceOption>,
    pub complexity_levels: Vec<ChoiceOption>,
    pub dataset_sizes: Vec<ChoiceOption>,
}

impl CatalogResponse {
    pub fn build() -> Self {
        Self {
            title: APP_TITLE,
            tagline: APP_TAGLINE,
            intro: APP_INTRO,
            closing_note: CLOSING_NOTE,
            goals: catalog_of::<Goal>(),
            data_availability: catalog_of::<DataAvailability>(),
            data_types: catalog_of::<DataType>(),
            objectives: catalog_of::<Objective>(),
            content_types: catalog_of::<ContentType>(),
            complexity_levels: catalog_of::<Complexity>(),
            dataset_sizes: catalog_of::<DatasetSize>(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
