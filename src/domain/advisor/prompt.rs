//! Prompt synthesis - turns a completed AnswerSet into the request text.
//!
//! Synthesis is pure: identical (goal, answers) always produce a
//! byte-identical [`Prompt`], with no I/O.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

use super::answers::{AnswerSet, BusinessConstraints, ObjectiveSelection};
use super::catalog::{Choice, DataType, Goal};

/// System instruction for data-driven (automate/analyze) prompts.
pub const ANALYTIC_SYSTEM_INSTRUCTION: &str =
    "You are an expert data scientist providing concise and practical advice.";

/// System instruction for content-creation prompts.
pub const CREATIVE_SYSTEM_INSTRUCTION: &str = "You are an expert AI assistant providing concise and practical advice on AI tools for content creation.";

const ANALYTIC_OPENING: &str = "I am working on a project where I want to ";
const ANALYTIC_CLOSING: &str = "Please provide a short but informative recommendation on suitable machine learning approaches and tools I can use to build this myself, or if I should consult a data scientist.";
const CREATIVE_OPENING: &str = "I want to create ";
const CREATIVE_CLOSING: &str = "using AI tools. Please provide a short but informative recommendation on suitable AI tools or models I can use to build this myself, or if I should consult a specialist.";

/// Prompt family; decides the system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Analytic,
    Creative,
}

impl Branch {
    /// Branch used for a goal, `None` when the goal asks for no recommendation.
    pub fn for_goal(goal: Goal) -> Option<Branch> {
        match goal {
            Goal::AutomateOrPredict | Goal::AnalyzeInsights => Some(Branch::Analytic),
            Goal::CreateContent => Some(Branch::Creative),
            Goal::NoneOfTheAbove => None,
        }
    }

    pub fn system_instruction(&self) -> &'static str {
        match self {
            Branch::Analytic => ANALYTIC_SYSTEM_INSTRUCTION,
            Branch::Creative => CREATIVE_SYSTEM_INSTRUCTION,
        }
    }
}

/// Immutable synthesized prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    branch: Branch,
    text: String,
}

impl Prompt {
    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn system_instruction(&self) -> &'static str {
        self.branch.system_instruction()
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Reasons a prompt cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("no recommendation is requested for goal '{0}'")]
    NotApplicable(Goal),

    #[error("data must be available before a recommendation can be requested")]
    NoData,

    #[error("answers incomplete: {0}")]
    Incomplete(#[from] ValidationError),
}

/// Builds the prompt for `goal` from `answers`.
///
/// # Errors
///
/// - `NotApplicable` for [`Goal::NoneOfTheAbove`]
/// - `NoData` when the user said no data is available
/// - `Incomplete` when a field required by the goal's sub-flow is missing
pub fn synthesize(goal: Goal, answers: &AnswerSet) -> Result<Prompt, SynthesisError> {
    let branch = Branch::for_goal(goal).ok_or(SynthesisError::NotApplicable(goal))?;
    let text = match branch {
        Branch::Analytic => analytic_text(answers)?,
        Branch::Creative => creative_text(answers)?,
    };
    Ok(Prompt { branch, text })
}

/// Business consideration clauses in their fixed order. The dataset size
/// clause is always present.
pub fn constraint_clauses(constraints: &BusinessConstraints) -> Vec<String> {
    let mut clauses = Vec::with_capacity(5);
    if constraints.interpretability {
        clauses.push("interpretability is important".to_string());
    }
    if constraints.accuracy {
        clauses.push("high accuracy is critical".to_string());
    }
    if constraints.limited_resources {
        clauses.push("limited computational resources".to_string());
    }
    clauses.push(format!(
        "dataset size is {}",
        constraints.dataset_size.label().to_lowercase()
    ));
    if constraints.quick_deployment {
        clauses.push("need quick deployment".to_string());
    }
    clauses
}

fn analytic_text(answers: &AnswerSet) -> Result<String, SynthesisError> {
    match answers.data_available() {
        Some(true) => {}
        Some(false) => return Err(SynthesisError::NoData),
        None => return Err(ValidationError::empty_field("data_available").into()),
    }
    let data_types = answers.require_data_types()?;
    let objectives = answers.require_objectives()?;
    let constraints = answers.require_business_constraints()?;

    let mut text = String::from(ANALYTIC_OPENING);
    match answers.description() {
        Some(description) => text.push_str(description),
        None => {
            text.push_str("achieve the following objectives: ");
            text.push_str(&objectives_clause(objectives));
        }
    }
    text.push_str(". I have the following types of data: ");
    text.push_str(&data_types_clause(data_types));
    text.push_str(". Business considerations include: ");
    text.push_str(&constraint_clauses(constraints).join(", "));
    text.push_str(". ");
    text.push_str(ANALYTIC_CLOSING);
    Ok(text)
}

fn creative_text(answers: &AnswerSet) -> Result<String, SynthesisError> {
    let content = answers.require_content()?;
    let complexity = answers.require_complexity()?;

    let mut text = String::from(CREATIVE_OPENING);
    match answers.description() {
        Some(description) => {
            text.push_str(description);
            text.push(' ');
        }
        None => {
            text.push_str(&complexity.label().to_lowercase());
            text.push(' ');
            text.push_str(&content.description().to_lowercase());
            text.push(' ');
        }
    }
    text.push_str(CREATIVE_CLOSING);
    Ok(text)
}

// Labels are lowercased in selection order, the "other" option included;
// the free text follows them verbatim.
fn objectives_clause(objectives: &ObjectiveSelection) -> String {
    objectives
        .selected()
        .iter()
        .map(|objective| objective.label().to_lowercase())
        .chain(objectives.other().map(str::to_string))
        .collect::<Vec<_>>()
        .join(", ")
}

fn data_types_clause(data_types: &[DataType]) -> String {
    data_types
        .iter()
        .map(|data_type| data_type.name().to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}
