//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `FORM_ASSISTANT` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use form_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod forms;
mod redis;
mod server;
mod sessions;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use forms::FormsConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use sessions::{SessionBackend, SessionsConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Text generation for the REASON phase
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub sessions: SessionsConfig,

    /// Required when `sessions.backend` is `redis`
    pub redis: Option<RedisConfig>,

    #[serde(default)]
    pub forms: FormsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `FORM_ASSISTANT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FORM_ASSISTANT__SESSIONS__BACKEND=redis` -> `sessions.backend = redis`
    ///
    /// A `.env` file is read first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FORM_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.sessions.validate()?;
        match (&self.redis, self.sessions.backend) {
            (Some(redis), _) => redis.validate()?,
            (None, SessionBackend::Redis) => {
                return Err(ValidationError::MissingRequired("REDIS__URL"));
            }
            (None, SessionBackend::Memory) => {}
        }
        self.forms.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
