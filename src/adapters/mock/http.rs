//! Scripted mock HTTP client.
//!
//! The streaming variant serves a response body pre-split into an arbitrary
//! list of byte chunks, which is how the chunk-boundary tests drive the frame
//! decoder.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// A recorded request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// Scripted behavior for one URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Plain response
    Success(Response),
    /// Request-level error
    Error(HttpError),
    /// Streaming body served as these exact chunks, in order
    Stream(Vec<Bytes>),
    /// Streaming body whose chunks are followed by a read error
    StreamThenError(Vec<Bytes>, HttpError),
    /// Streaming body whose chunks are followed by a read that never
    /// resolves, for cancellation tests
    StreamThenHang(Vec<Bytes>),
}

/// Mock [`HttpClient`] with per-URL scripted responses and request recording.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for a URL (exact match first, then prefix match).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .insert(url.to_string(), response);
    }

    /// All requests made so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    fn record(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(RecordedRequest {
                method: method.to_string(),
                url: url.to_string(),
                headers: headers.clone(),
                body,
            });
    }

    fn response_for(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().expect("mock lock poisoned");
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        responses
            .iter()
            .find(|(pattern, _)| url.starts_with(pattern.as_str()))
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("GET", url, headers, None);
        match self.response_for(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(
                "stream response scripted for non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("no mock response for {}", url))),
        }
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("POST", url, headers, Some(body.to_string()));
        match self.response_for(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(
                "stream response scripted for non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("no mock response for {}", url))),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record("POST", url, headers, Some(body.to_string()));
        match self.response_for(url) {
            Some(MockResponse::Stream(chunks)) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok));
                Ok(Box::pin(stream))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items: Vec<Result<Bytes, HttpError>> =
                    chunks.into_iter().map(Ok).chain(std::iter::once(Err(err))).collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::StreamThenHang(chunks)) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok))
                    .chain(futures::stream::pending());
                Ok(Box::pin(stream))
            }
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Success(_)) => Err(HttpError::Other(
                "non-stream response scripted for stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("no mock response for {}", url))),
        }
    }
}
