//! Decision flow - the wizard's stage state machine.
//!
//! The flow is a pure function of `(stage, answers, answer)`. It never does
//! I/O; the session aggregate calls it and persists the result.
//!
//! ```text
//! AwaitGoal ─┬─ none of the above ─▶ NotNecessary
//!            ├─ automate/analyze ──▶ AwaitDataAvailability ─┬─ no ──▶ CollectDataFirst
//!            │                                              └─ yes ─▶ AwaitDataTypes
//!            │                          ▶ AwaitObjectives ▶ AwaitBusinessConstraints ▶ Ready
//!            └─ create content ────▶ AwaitContentType ▶ AwaitComplexity ▶ Ready
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

use super::answers::{AnswerSet, BusinessConstraints, ContentSelection, ObjectiveSelection};
use super::catalog::{Complexity, ContentType, DataAvailability, DataType, Goal, Objective};

/// Shown when the user needs no AI at all.
pub const NOT_NECESSARY_MESSAGE: &str = "AI might not be necessary for your needs.";

/// Shown when the user has no data to work with.
pub const COLLECT_DATA_MESSAGE: &str = "You may need to collect data before using AI.";

const CHOOSE_GOAL_FIRST: &str = "Please choose your main goal first.";
const FLOW_ENDED: &str = "This path has ended. Choose a different goal to continue.";
const ANSWER_CURRENT_FIRST: &str = "Please answer the current question first.";
const WRONG_PATH: &str = "That question is not part of the path for your goal.";

/// One step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AwaitGoal,
    NotNecessary,
    AwaitDataAvailability,
    CollectDataFirst,
    AwaitDataTypes,
    AwaitObjectives,
    AwaitBusinessConstraints,
    AwaitContentType,
    AwaitComplexity,
    Ready,
}

const DATA_PATH: &[Stage] = &[
    Stage::AwaitDataAvailability,
    Stage::AwaitDataTypes,
    Stage::AwaitObjectives,
    Stage::AwaitBusinessConstraints,
    Stage::Ready,
];

const CONTENT_PATH: &[Stage] = &[Stage::AwaitContentType, Stage::AwaitComplexity, Stage::Ready];

const ENTRY_STAGES: [Stage; 3] = [
    Stage::NotNecessary,
    Stage::AwaitDataAvailability,
    Stage::AwaitContentType,
];

impl Stage {
    /// First stage reached after choosing `goal`.
    pub fn entry_for(goal: Goal) -> Stage {
        match goal {
            Goal::AutomateOrPredict | Goal::AnalyzeInsights => Stage::AwaitDataAvailability,
            Goal::CreateContent => Stage::AwaitContentType,
            Goal::NoneOfTheAbove => Stage::NotNecessary,
        }
    }

    /// Ordered question stages of the sub-flow for `goal`.
    pub fn path_for(goal: Goal) -> &'static [Stage] {
        match goal {
            Goal::AutomateOrPredict | Goal::AnalyzeInsights => DATA_PATH,
            Goal::CreateContent => CONTENT_PATH,
            Goal::NoneOfTheAbove => &[],
        }
    }

    /// Heading the UI shows for the question asked at this stage.
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            Stage::AwaitGoal => Some("Step 1: Identify Your Main Goal"),
            Stage::AwaitDataAvailability => Some("Step 2: Assess Data Availability"),
            Stage::AwaitDataTypes => Some("Step 3: Describe Your Data"),
            Stage::AwaitObjectives => Some("Step 4: Define Your Objective with the Data"),
            Stage::AwaitBusinessConstraints => Some("Step 5: Consider Business Requirements"),
            Stage::AwaitContentType => Some("Step 2: Specify the Content to Create"),
            Stage::AwaitComplexity => Some("Step 3: Determine the Complexity"),
            Stage::NotNecessary | Stage::CollectDataFirst | Stage::Ready => None,
        }
    }

    /// True when a prompt can be synthesized and dispatched.
    pub fn is_ready(&self) -> bool {
        matches!(self, Stage::Ready)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AwaitGoal => "await_goal",
            Stage::NotNecessary => "not_necessary",
            Stage::AwaitDataAvailability => "await_data_availability",
            Stage::CollectDataFirst => "collect_data_first",
            Stage::AwaitDataTypes => "await_data_types",
            Stage::AwaitObjectives => "await_objectives",
            Stage::AwaitBusinessConstraints => "await_business_constraints",
            Stage::AwaitContentType => "await_content_type",
            Stage::AwaitComplexity => "await_complexity",
            Stage::Ready => "ready",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        // A new goal can be chosen from anywhere.
        let mut targets = ENTRY_STAGES.to_vec();
        match self {
            AwaitGoal | NotNecessary | CollectDataFirst | AwaitContentType | AwaitComplexity => {}
            AwaitDataAvailability => targets.push(AwaitDataTypes),
            AwaitDataTypes | AwaitObjectives | AwaitBusinessConstraints | Ready => {
                targets.push(CollectDataFirst)
            }
        }
        match self {
            AwaitDataAvailability => targets.push(CollectDataFirst),
            AwaitDataTypes => targets.push(AwaitObjectives),
            AwaitObjectives => targets.push(AwaitBusinessConstraints),
            AwaitBusinessConstraints | AwaitComplexity => targets.push(Ready),
            AwaitContentType => targets.push(AwaitComplexity),
            _ => {}
        }
        targets
    }

    /// Terminal stages only accept a new goal.
    fn is_terminal(&self) -> bool {
        matches!(self, Stage::NotNecessary | Stage::CollectDataFirst)
    }
}

/// A single submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Goal(Goal),
    Description(Option<String>),
    DataAvailability(DataAvailability),
    DataTypes(Vec<DataType>),
    Objectives {
        selected: Vec<Objective>,
        other: Option<String>,
    },
    BusinessConstraints(BusinessConstraints),
    ContentType {
        selected: ContentType,
        other: Option<String>,
    },
    Complexity(Complexity),
}

impl Answer {
    /// Stage that asks this question. The goal and the description are not
    /// tied to a single stage.
    pub fn asked_at(&self) -> Option<Stage> {
        match self {
            Answer::Goal(_) | Answer::Description(_) => None,
            Answer::DataAvailability(_) => Some(Stage::AwaitDataAvailability),
            Answer::DataTypes(_) => Some(Stage::AwaitDataTypes),
            Answer::Objectives { .. } => Some(Stage::AwaitObjectives),
            Answer::BusinessConstraints(_) => Some(Stage::AwaitBusinessConstraints),
            Answer::ContentType { .. } => Some(Stage::AwaitContentType),
            Answer::Complexity(_) => Some(Stage::AwaitComplexity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Message attached to a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Outcome of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Stage,
    pub stage: Stage,
    /// False when the answer was rejected and nothing changed.
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl Transition {
    fn accepted(from: Stage, stage: Stage) -> Self {
        Self {
            from,
            stage,
            accepted: true,
            notice: arrival_notice(stage),
        }
    }

    fn rejected(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            from: stage,
            stage,
            accepted: false,
            notice: Some(Notice::warning(message)),
        }
    }
}

fn arrival_notice(stage: Stage) -> Option<Notice> {
    match stage {
        Stage::NotNecessary => Some(Notice::info(NOT_NECESSARY_MESSAGE)),
        Stage::CollectDataFirst => Some(Notice::warning(COLLECT_DATA_MESSAGE)),
        _ => None,
    }
}

/// Applies `answer` at `stage`.
///
/// A rejected answer leaves `answers` untouched and keeps the stage.
pub fn advance(stage: Stage, answers: &mut AnswerSet, answer: Answer) -> Transition {
    match answer {
        Answer::Goal(goal) => choose_goal(stage, answers, goal),
        Answer::Description(text) => {
            if answers.goal().is_none() {
                return Transition::rejected(stage, CHOOSE_GOAL_FIRST);
            }
            if stage.is_terminal() {
                return Transition::rejected(stage, FLOW_ENDED);
            }
            answers.set_description(text);
            Transition::accepted(stage, stage)
        }
        answer => answer_question(stage, answers, answer),
    }
}

fn choose_goal(stage: Stage, answers: &mut AnswerSet, goal: Goal) -> Transition {
    // Re-picking the active goal keeps progress unless the path had ended.
    if answers.goal() == Some(goal) && !stage.is_terminal() && stage != Stage::AwaitGoal {
        return Transition::accepted(stage, stage);
    }
    let next = Stage::entry_for(goal);
    if let Err(err) = stage.transition_to(next) {
        return Transition::rejected(stage, err.to_string());
    }
    answers.set_goal(goal);
    Transition::accepted(stage, next)
}

fn answer_question(stage: Stage, answers: &mut AnswerSet, answer: Answer) -> Transition {
    let Some(goal) = answers.goal() else {
        return Transition::rejected(stage, CHOOSE_GOAL_FIRST);
    };
    if stage.is_terminal() {
        return Transition::rejected(stage, FLOW_ENDED);
    }

    let path = Stage::path_for(goal);
    let position = |s: Stage| path.iter().position(|p| *p == s);
    let (Some(asked), Some(current)) = (answer.asked_at().and_then(position), position(stage))
    else {
        return Transition::rejected(stage, WRONG_PATH);
    };
    if asked > current {
        return Transition::rejected(stage, ANSWER_CURRENT_FIRST);
    }

    let next = match &answer {
        Answer::DataAvailability(DataAvailability::No) => Stage::CollectDataFirst,
        _ if asked == current => path.get(current + 1).copied().unwrap_or(stage),
        // Edits of passed stages keep the current stage.
        _ => stage,
    };
    if next != stage {
        if let Err(err) = stage.transition_to(next) {
            return Transition::rejected(stage, err.to_string());
        }
    }

    match record(answers, answer) {
        Ok(()) => Transition::accepted(stage, next),
        Err(err) => Transition::rejected(stage, warning_for(&err)),
    }
}

fn record(answers: &mut AnswerSet, answer: Answer) -> Result<(), ValidationError> {
    match answer {
        Answer::DataAvailability(available) => answers.set_data_available(available.as_bool()),
        Answer::DataTypes(data_types) => answers.set_data_types(data_types),
        Answer::Objectives { selected, other } => {
            answers.set_objectives(ObjectiveSelection::new(selected, other)?)
        }
        Answer::BusinessConstraints(constraints) => answers.set_business_constraints(constraints),
        Answer::ContentType { selected, other } => {
            answers.set_content(ContentSelection::new(selected, other)?)
        }
        Answer::Complexity(complexity) => answers.set_complexity(complexity),
        Answer::Goal(goal) => {
            answers.set_goal(goal);
            Ok(())
        }
        Answer::Description(text) => {
            answers.set_description(text);
            Ok(())
        }
    }
}

/// User-facing wording for a rejected answer.
fn warning_for(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyField { field } => match field.as_str() {
            "data_types" => "Please select at least one data type.".to_string(),
            "objectives" => "Please select at least one objective.".to_string(),
            "other_objective" => "Please specify your other objective.".to_string(),
            "content_type" => "Please specify the content type.".to_string(),
            _ => err.to_string(),
        },
        _ => err.to_string(),
    }
}
