//! Runtime configuration.
//!
//! Read once at startup from `.env` and the process environment. Variables
//! use the `THINKAI` prefix with `__` between sections, for example
//! `THINKAI__SERVER__PORT=8080` or `THINKAI__AI__MODEL=gpt-4o`.
//!
//! ```no_run
//! use thinkai::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

mod ai;
mod error;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use secrecy::Secret;
use serde::Deserialize;

/// Plain variable name honored when `THINKAI__AI__OPENAI_API_KEY` is unset.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Root application configuration
///
/// Every section has defaults, so an empty environment is a valid
/// configuration (dispatches then fail with "missing credential").
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI backend configuration (OpenAI-compatible)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Reads `.env`, then `THINKAI__*` variables, then `OPENAI_API_KEY`
    /// if no key was set under the prefix.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` when a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("THINKAI")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if config.ai.openai_api_key.is_none() {
            config.ai.openai_api_key = std::env::var(OPENAI_API_KEY_VAR).ok().map(Secret::new);
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
