//! Text-generation configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Text-generation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub provider: AiProvider,

    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout for one provider request, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Upper bound on the whole REASON phase, in seconds
    #[serde(default = "default_reason_timeout")]
    pub reason_timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// Which text generator backs the REASON phase
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAI,
    /// REASON always falls back to its placeholder
    #[default]
    Disabled,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn reason_timeout(&self) -> Duration {
        Duration::from_secs(self.reason_timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::OpenAI && !self.has_openai() {
            return Err(ValidationError::MissingRequired("AI__OPENAI_API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.reason_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            reason_timeout_secs: default_reason_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_reason_timeout() -> u64 {
    10
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    300
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Disabled);
        assert_eq!(config.reason_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_openai_requires_key() {
        let config = AiConfig {
            provider: AiProvider::OpenAI,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::MissingRequired(_))));

        let config = AiConfig {
            provider: AiProvider::OpenAI,
            openai_api_key: Some(Secret::new("sk-xxx".to_string())),
            ..Default::default()
        };
        assert!(config.has_openai());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(!config.has_openai());
    }

    #[test]
    fn test_validation_rejects_bad_temperature() {
        let config = AiConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTemperature)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new("sk-very-secret".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
