//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `advisor` - Questionnaire catalogs, stage flow, prompt synthesis and the session aggregate

pub mod advisor;
pub mod foundation;
