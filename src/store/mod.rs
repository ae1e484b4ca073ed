//! Owned chat state and the streaming send path.
//!
//! The store holds the session list, the current session, and the message
//! array as plain owned state; callers read them through accessors and observe
//! streaming progress through an explicit [`DeltaSink`]. One exchange at a
//! time may stream per store; a second send while one is in flight is
//! rejected.

use chrono::Utc;
use futures_util::StreamExt;

use crate::api::{ApiError, AssistantApi};
use crate::error::SendError;
use crate::models::{Attachment, Message, Session, StreamRequest};
use crate::sse::{parse_frame, FrameDecoder};
use crate::stream::{CancelToken, DeltaSink, StreamPhase, StreamReducer};
use crate::traits::{HttpClient, TokenProvider};

const MAX_TITLE_CHARS: usize = 20;

/// Product-level toggles for session bootstrap behavior.
#[derive(Debug, Clone, Default)]
pub struct ChatStoreConfig {
    /// Synthetic assistant greeting shown when a session is created or an
    /// empty session is selected.
    pub welcome_message: Option<String>,
    /// Load rule-based suggested questions onto the greeting.
    pub auto_smart_questions: bool,
}

/// Result of a finished streaming send.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamOutcome {
    /// The finalized assistant message
    pub message: Message,
    /// [`StreamPhase::Complete`], or [`StreamPhase::Cancelled`] when the
    /// caller aborted mid-stream
    pub phase: StreamPhase,
}

/// Owned chat state: sessions, current session, messages, and the one
/// in-flight streaming exchange.
pub struct ChatStore<H, T> {
    api: AssistantApi<H, T>,
    config: ChatStoreConfig,
    sessions: Vec<Session>,
    current_session: Option<Session>,
    messages: Vec<Message>,
    streaming: bool,
}

impl<H: HttpClient, T: TokenProvider> ChatStore<H, T> {
    pub fn new(api: AssistantApi<H, T>) -> Self {
        Self::with_config(api, ChatStoreConfig::default())
    }

    pub fn with_config(api: AssistantApi<H, T>, config: ChatStoreConfig) -> Self {
        Self {
            api,
            config,
            sessions: Vec::new(),
            current_session: None,
            messages: Vec::new(),
            streaming: false,
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current_session.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// The in-progress assistant message, when a send is streaming.
    ///
    /// This is the message the reducer mutates in place: the entry in
    /// [`ChatStore::messages`] accumulates content as deltas arrive, so a
    /// renderer reading store state always sees the current partial content.
    pub fn streaming_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_streaming())
    }

    /// Replace the session list from the backend.
    pub async fn fetch_sessions(&mut self) -> Result<(), ApiError> {
        self.sessions = self.api.list_sessions().await?;
        Ok(())
    }

    /// Create a session and make it current.
    ///
    /// The title comes from the seed text, falling back to the first
    /// attachment's file name and then to a timestamped default.
    pub async fn create_session(
        &mut self,
        title_seed: Option<&str>,
        attachments: &[Attachment],
    ) -> Result<Session, ApiError> {
        let title = build_session_title(title_seed, attachments);
        let session = self.api.create_session(&title).await?;
        self.sessions.insert(0, session.clone());
        self.current_session = Some(session.clone());
        self.messages.clear();
        self.bootstrap_welcome().await;
        Ok(session)
    }

    /// Switch to a known session and load its history.
    pub async fn select_session(&mut self, session_id: &str) -> Result<(), ApiError> {
        let Some(session) = self.sessions.iter().find(|s| s.id == session_id).cloned() else {
            return Ok(());
        };
        self.current_session = Some(session);
        self.fetch_messages(session_id).await?;
        if self.messages.is_empty() {
            self.bootstrap_welcome().await;
        }
        Ok(())
    }

    /// Load the message history of a session.
    pub async fn fetch_messages(&mut self, session_id: &str) -> Result<(), ApiError> {
        self.messages = self.api.get_messages(session_id).await?;
        Ok(())
    }

    /// Send a user message and consume the streaming response.
    ///
    /// The user message and an empty assistant placeholder are appended to the
    /// message list before the first byte is read. The reducer streams into
    /// that stored placeholder directly: it is the live in-progress message,
    /// and the sink is notified for each delta, in order. After any terminal
    /// state the canonical session list is refreshed best-effort.
    ///
    /// Only transport failures produce an `Err`; cancellation yields
    /// `Ok` with [`StreamPhase::Cancelled`] and the partial content.
    pub async fn send_streaming(
        &mut self,
        content: &str,
        attachments: Vec<Attachment>,
        sink: Option<&mut dyn DeltaSink>,
        cancel: Option<&CancelToken>,
    ) -> Result<StreamOutcome, SendError> {
        if self.streaming {
            return Err(SendError::Busy);
        }

        let session_id = self.ensure_session(content, &attachments).await?;

        self.messages.push(Message::user(content, attachments.clone()));
        self.messages.push(Message::assistant_placeholder());
        let slot = self.messages.len() - 1;

        let request = StreamRequest::new(session_id.clone(), content).with_attachments(attachments);

        self.streaming = true;
        let (result, phase) = {
            let mut reducer = StreamReducer::new(&mut self.messages[slot]);
            let result = Self::drive(&self.api, &request, &mut reducer, sink, cancel).await;
            (result, reducer.phase())
        };
        self.streaming = false;

        let message = self.messages[slot].clone();

        // Best-effort refresh regardless of how the exchange ended
        self.reconcile_session(&session_id).await;

        result.map(|()| StreamOutcome { message, phase })
    }

    /// Refresh the canonical session list and merge the canonical `title` and
    /// `message_count` into the current session.
    ///
    /// Failures are logged and swallowed: the message exchange this follows
    /// has already succeeded or failed on its own.
    pub async fn reconcile_session(&mut self, session_id: &str) {
        match self.api.list_sessions().await {
            Ok(canonical) => {
                self.sessions = canonical;
                let canonical_session = self.sessions.iter().find(|s| s.id == session_id).cloned();
                if let (Some(current), Some(canonical_session)) =
                    (self.current_session.as_mut(), canonical_session)
                {
                    if current.id == session_id {
                        current.merge_canonical(&canonical_session);
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, session_id, "session reconciliation failed");
            }
        }
    }

    async fn ensure_session(
        &mut self,
        content: &str,
        attachments: &[Attachment],
    ) -> Result<String, SendError> {
        if let Some(session) = &self.current_session {
            return Ok(session.id.clone());
        }
        let session = self.create_session(Some(content), attachments).await?;
        Ok(session.id)
    }

    async fn bootstrap_welcome(&mut self) {
        let Some(text) = self.config.welcome_message.clone() else {
            return;
        };
        let mut welcome = Message::assistant(text);
        if self.config.auto_smart_questions {
            match self.api.smart_questions("fast").await {
                Ok(questions) => welcome.metadata.quick_actions = questions,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load suggested questions");
                }
            }
        }
        self.messages.push(welcome);
    }

    /// Read the response body, reassemble frames, and apply events until the
    /// stream ends, fails, or is cancelled.
    ///
    /// Takes the api by reference rather than `&self` because the reducer
    /// holds a mutable borrow of the store's message list for the whole read.
    async fn drive(
        api: &AssistantApi<H, T>,
        request: &StreamRequest,
        reducer: &mut StreamReducer<'_>,
        mut sink: Option<&mut dyn DeltaSink>,
        cancel: Option<&CancelToken>,
    ) -> Result<(), SendError> {
        let mut stream = match api.stream_chat(request).await {
            Ok(stream) => stream,
            Err(err) => {
                reducer.fail();
                return Err(err.into());
            }
        };

        let mut decoder = FrameDecoder::new();
        loop {
            let next = match cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        // Dropping the stream aborts the transport
                        tracing::debug!("streaming send cancelled by caller");
                        reducer.cancel();
                        return Ok(());
                    }
                    item = stream.next() => item,
                },
                None => stream.next().await,
            };

            match next {
                Some(Ok(chunk)) => {
                    for frame in decoder.feed(&chunk) {
                        reducer.apply(parse_frame(&frame), sink.as_deref_mut());
                    }
                }
                Some(Err(err)) => {
                    reducer.fail();
                    return Err(err.into());
                }
                None => {
                    decoder.finish();
                    reducer.finish();
                    return Ok(());
                }
            }
        }
    }

}

/// Derive a session title from the first user turn.
fn build_session_title(seed: Option<&str>, attachments: &[Attachment]) -> String {
    if let Some(seed) = seed {
        let normalized = normalize_whitespace(seed);
        if !normalized.is_empty() {
            return truncate_title(&normalized);
        }
    }
    if let Some(attachment) = attachments.first() {
        let name = attachment.file_name.as_str();
        let base = name.rsplit_once('.').map(|(base, _)| base).unwrap_or(name);
        let normalized = normalize_whitespace(base);
        if !normalized.is_empty() {
            return truncate_title(&normalized);
        }
    }
    format!("New chat {}", Utc::now().format("%m-%d %H:%M"))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to [`MAX_TITLE_CHARS`] characters, not bytes.
fn truncate_title(text: &str) -> String {
    let mut chars = text.chars();
    let prefix: String = chars.by_ref().take(MAX_TITLE_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
