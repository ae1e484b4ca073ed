//! Token provider trait abstraction.
//!
//! The chat endpoints require an `Authorization: Bearer <token>` header; how
//! the token is stored and refreshed is outside this crate's scope, so
//! retrieval sits behind a trait.

use async_trait::async_trait;

/// Token retrieval errors.
#[derive(Debug, Clone)]
pub enum TokenError {
    /// No user is signed in
    NotAuthenticated,
    /// Token store could not be read
    LoadFailed(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::NotAuthenticated => write!(f, "Not authenticated"),
            TokenError::LoadFailed(msg) => write!(f, "Failed to load token: {}", msg),
            TokenError::Other(msg) => write!(f, "Token error: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

/// Trait for access-token retrieval.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The bearer token for the `Authorization` header, or `None` when the
    /// request should go out unauthenticated.
    async fn access_token(&self) -> Result<Option<String>, TokenError>;
}
