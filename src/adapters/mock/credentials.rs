//! Static token provider for tests.

use async_trait::async_trait;

use crate::traits::{TokenError, TokenProvider};

/// Token provider returning a fixed token (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// A provider with no token: requests go out unauthenticated.
    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<Option<String>, TokenError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticTokenProvider::new("tok-123");
        assert_eq!(
            provider.access_token().await.unwrap(),
            Some("tok-123".to_string())
        );
    }

    #[tokio::test]
    async fn test_anonymous() {
        let provider = StaticTokenProvider::anonymous();
        assert_eq!(provider.access_token().await.unwrap(), None);
    }
}
