//! Session store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Idle lifetime of a session in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Capacity of the in-memory store
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    Memory,
    Redis,
}

impl SessionsConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 || self.max_sessions == 0 {
            return Err(ValidationError::InvalidSessionLimits);
        }
        Ok(())
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            ttl_secs: default_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_ttl() -> u64 {
    60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}
