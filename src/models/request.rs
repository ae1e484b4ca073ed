use serde::{Deserialize, Serialize};

use super::{Attachment, QuickAction};

/// Request body for the streaming chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamRequest {
    pub session_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl StreamRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            attachments: None,
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        if !attachments.is_empty() {
            self.attachments = Some(attachments);
        }
        self
    }
}

/// Request body for session creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateSessionRequest {
    pub title: String,
}

/// Response from the smart-questions endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SmartQuestionsResponse {
    #[serde(default)]
    pub questions: Vec<QuickAction>,
    #[serde(default)]
    pub mode: String,
}
