//! AI Provider Adapters.
//!
//! - `OpenAIProvider` - OpenAI chat completions
//! - `MockAIProvider` - Configurable mock for testing
//! - `DisabledAIProvider` - Always unavailable; REASON uses its placeholder

mod disabled_provider;
mod mock_provider;
mod openai_provider;

pub use disabled_provider::DisabledAIProvider;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
