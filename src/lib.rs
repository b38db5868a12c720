//! ThinkAI - AI Decision-Making Assistant
//!
//! A guided questionnaire that asks about a user's goal, data and business
//! constraints, turns the answers into a recommendation prompt, and sends it
//! to a text-generation backend on request.
//!
//! # Layers
//!
//! - `domain` - catalogs, stage flow, prompt synthesis, session aggregate
//! - `ports` - completion client and session store contracts
//! - `application` - one handler per use case
//! - `adapters` - OpenAI client, in-memory store, HTTP API
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
