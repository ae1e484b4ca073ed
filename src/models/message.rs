use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// Delivery status of a message.
///
/// Messages loaded from the backend or typed by the user are `Complete`.
/// The assistant placeholder created at stream start is `Streaming` until the
/// exchange reaches a terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Complete,
    Streaming,
    Failed,
    Cancelled,
}

/// A suggested action button attached to an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuickAction {
    /// Widget kind, e.g. "button"
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Label shown to the user
    #[serde(default)]
    pub label: String,
    /// Action identifier, e.g. "send_question"
    #[serde(default)]
    pub action: String,
    /// Action payload
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Descriptor for a file attached to a message. Set once at creation and never
/// mutated by streaming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            url: None,
            content_type: None,
        }
    }
}

/// Auxiliary fields carried alongside a message's content.
///
/// The named fields are the ones the streaming endpoint populates; anything
/// else the backend sends is preserved in `extra`. Merges are replace-on-key,
/// never deep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageMetadata {
    /// Classification of the user turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Reasoning trace; each update replaces the previous snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    /// Knowledge sources backing the answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Value>,
    /// Suggested follow-up actions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_actions: Vec<QuickAction>,
    /// Fields this client does not model explicitly
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl MessageMetadata {
    pub fn is_empty(&self) -> bool {
        self.intent.is_none()
            && self.thinking.is_none()
            && self.sources.is_empty()
            && self.quick_actions.is_empty()
            && self.extra.is_empty()
    }
}

/// A single message within a chat session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Stable identifier (server-assigned for history, locally generated for
    /// in-flight messages)
    pub id: String,
    pub role: MessageRole,
    /// Text content; grows by append only while streaming
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default)]
    pub metadata: MessageMetadata,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// A user message ready to send.
    pub fn user(content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
            status: MessageStatus::Complete,
            metadata: MessageMetadata::default(),
            attachments,
        }
    }

    /// A completed assistant message, e.g. a synthetic greeting.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
            status: MessageStatus::Complete,
            metadata: MessageMetadata::default(),
            attachments: Vec::new(),
        }
    }

    /// The empty assistant message created at stream start, before any content
    /// has arrived.
    pub fn assistant_placeholder() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: String::new(),
            created_at: Utc::now(),
            status: MessageStatus::Streaming,
            metadata: MessageMetadata::default(),
            attachments: Vec::new(),
        }
    }

    /// Append a content delta during streaming.
    pub fn append_delta(&mut self, delta: &str) {
        self.content.push_str(delta);
    }

    pub fn is_streaming(&self) -> bool {
        self.status == MessageStatus::Streaming
    }
}
