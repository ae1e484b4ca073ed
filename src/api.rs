//! REST client for the assistant chat backend.
//!
//! Thin request/response wrappers over the [`HttpClient`] seam, plus the
//! streaming POST that hands the raw byte stream to the send path. All
//! requests carry `Authorization: Bearer <token>` when the token provider has
//! one.

use crate::models::{CreateSessionRequest, Message, QuickAction, Session, SmartQuestionsResponse, StreamRequest};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response, TokenError, TokenProvider};

/// Default backend base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001/api";

/// Error type for backend API operations.
#[derive(Debug)]
pub enum ApiError {
    /// HTTP request failed
    Http(HttpError),
    /// Token retrieval failed
    Token(TokenError),
    /// JSON (de)serialization failed
    Json(serde_json::Error),
    /// Server returned an error status
    Status { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {}", e),
            ApiError::Token(e) => write!(f, "Token error: {}", e),
            ApiError::Json(e) => write!(f, "JSON error: {}", e),
            ApiError::Status { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            ApiError::Token(e) => Some(e),
            ApiError::Json(e) => Some(e),
            ApiError::Status { .. } => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Http(e)
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        ApiError::Token(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}

/// Client for the assistant chat REST endpoints.
pub struct AssistantApi<H, T> {
    base_url: String,
    http: H,
    tokens: T,
}

impl<H: HttpClient, T: TokenProvider> AssistantApi<H, T> {
    /// Create a client against [`DEFAULT_BASE_URL`].
    pub fn new(http: H, tokens: T) -> Self {
        Self::with_base_url(http, tokens, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(http: H, tokens: T, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a new chat session.
    pub async fn create_session(&self, title: &str) -> Result<Session, ApiError> {
        let url = format!("{}/chat/session", self.base_url);
        let body = serde_json::to_string(&CreateSessionRequest {
            title: title.to_string(),
        })?;
        let response = self.http.post(&url, &body, &self.auth_headers().await?).await?;
        Self::expect_success(&response)?;
        Ok(response.json()?)
    }

    /// Fetch the canonical session list.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let url = format!("{}/chat/sessions", self.base_url);
        let response = self.http.get(&url, &self.auth_headers().await?).await?;
        Self::expect_success(&response)?;
        Ok(response.json()?)
    }

    /// Fetch the message history of a session.
    pub async fn get_messages(&self, session_id: &str) -> Result<Vec<Message>, ApiError> {
        let url = format!("{}/chat/session/{}/messages", self.base_url, session_id);
        let response = self.http.get(&url, &self.auth_headers().await?).await?;
        Self::expect_success(&response)?;
        Ok(response.json()?)
    }

    /// Fetch suggested questions. `mode` selects the backend strategy
    /// ("fast" is rule-based).
    pub async fn smart_questions(&self, mode: &str) -> Result<Vec<QuickAction>, ApiError> {
        let url = format!("{}/chat/smart-questions?mode={}", self.base_url, mode);
        let response = self.http.get(&url, &self.auth_headers().await?).await?;
        Self::expect_success(&response)?;
        let parsed: SmartQuestionsResponse = response.json()?;
        Ok(parsed.questions)
    }

    /// Open the streaming chat response.
    ///
    /// A non-2xx status fails here, before any frame is read.
    pub async fn stream_chat(&self, request: &StreamRequest) -> Result<ByteStream, ApiError> {
        let url = format!("{}/chat/stream", self.base_url);
        let body = serde_json::to_string(request)?;
        let mut headers = self.auth_headers().await?;
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        Ok(self.http.post_stream(&url, &body, &headers).await?)
    }

    async fn auth_headers(&self) -> Result<Headers, ApiError> {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(token) = self.tokens.access_token().await? {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        Ok(headers)
    }

    fn expect_success(response: &Response) -> Result<(), ApiError> {
        if response.is_success() {
            return Ok(());
        }
        Err(ApiError::Status {
            status: response.status,
            message: response.text().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse, StaticTokenProvider};
    use bytes::Bytes;

    fn api(client: MockHttpClient) -> AssistantApi<MockHttpClient, StaticTokenProvider> {
        AssistantApi::with_base_url(client, StaticTokenProvider::new("tok-1"), "http://test/api")
    }

    #[test]
    fn test_default_base_url() {
        let api = AssistantApi::new(MockHttpClient::new(), StaticTokenProvider::anonymous());
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_create_session_posts_title_with_bearer() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://test/api/chat/session",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"{"id":"s-1","title":"Refunds","created_at":"2026-02-01T08:00:00Z","message_count":0}"#),
            )),
        );

        let api = api(client.clone());
        let session = api.create_session("Refunds").await.unwrap();
        assert_eq!(session.id, "s-1");

        let requests = client.requests();
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"title":"Refunds"}"#));
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some(&"Bearer tok-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_sessions() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://test/api/chat/sessions",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"[{"id":"s-1","title":"a","created_at":"2026-02-01T08:00:00Z","message_count":2}]"#),
            )),
        );

        let sessions = api(client).list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].message_count, 2);
    }

    #[tokio::test]
    async fn test_error_status_surfaces() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://test/api/chat/sessions",
            MockResponse::Success(Response::new(500, Bytes::from("boom"))),
        );

        let result = api(client).list_sessions().await;
        match result {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Status error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_smart_questions_unwraps_payload() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://test/api/chat/smart-questions",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"{"questions":[{"type":"button","label":"Refunds","action":"send_question","data":{}}],"mode":"fast"}"#),
            )),
        );

        let questions = api(client.clone()).smart_questions("fast").await.unwrap();
        assert_eq!(questions.len(), 1);
        assert!(client.requests()[0].url.ends_with("mode=fast"));
    }

    #[tokio::test]
    async fn test_stream_chat_sets_event_stream_accept() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://test/api/chat/stream",
            MockResponse::Stream(vec![Bytes::from("data: {\"type\":\"end\"}\n\n")]),
        );

        let request = StreamRequest::new("s-1", "hello");
        let _stream = api(client.clone()).stream_chat(&request).await.unwrap();

        let recorded = client.requests();
        assert_eq!(
            recorded[0].headers.get("Accept"),
            Some(&"text/event-stream".to_string())
        );
        assert!(recorded[0].body.as_deref().unwrap().contains(r#""session_id":"s-1""#));
    }
}
