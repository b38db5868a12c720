//! Advisor module - the guided AI/ML decision questionnaire.
//!
//! - `catalog` - fixed option sets for each question
//! - `answers` - the answers collected so far
//! - `flow` - stage state machine
//! - `prompt` - prompt synthesis
//! - `session` - the session aggregate

mod answers;
mod catalog;
mod errors;
mod flow;
mod prompt;
mod session;

pub use answers::{AnswerSet, BusinessConstraints, ContentSelection, ObjectiveSelection};
pub use catalog::{
    catalog_of, is_known_option, is_non_empty_selection, Choice, ChoiceOption, Complexity,
    ContentType, DataAvailability, DataType, DatasetSize, Goal, Objective, APP_INTRO, APP_TAGLINE,
    APP_TITLE, CLOSING_NOTE, OTHER_LABEL,
};
pub use errors::AdvisorError;
pub use flow::{
    advance, Answer, Notice, NoticeLevel, Stage, Transition, COLLECT_DATA_MESSAGE,
    NOT_NECESSARY_MESSAGE,
};
pub use prompt::{
    constraint_clauses, synthesize, Branch, Prompt, SynthesisError, ANALYTIC_SYSTEM_INSTRUCTION,
    CREATIVE_SYSTEM_INSTRUCTION,
};
pub use session::{AdvisorSession, DispatchError, DispatchRecord};
