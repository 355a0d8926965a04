//! Provider used when text generation is switched off.
//!
//! Every call fails as unavailable, so the REASON phase falls back to its
//! placeholder without any network traffic.

use async_trait::async_trait;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

#[derive(Debug, Clone, Default)]
pub struct DisabledAIProvider;

impl DisabledAIProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AIProvider for DisabledAIProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        Err(AIError::unavailable("text generation is disabled"))
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("disabled", "none", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::RequestMetadata;

    #[tokio::test]
    async fn always_unavailable() {
        let provider = DisabledAIProvider::new();
        let request =
            CompletionRequest::new(RequestMetadata::new(SessionId::new("s").unwrap(), "t"));

        let err = provider.complete(request).await.unwrap_err();
        assert!(matches!(err, AIError::Unavailable { .. }));
        assert_eq!(provider.provider_info().name, "disabled");
    }
}
