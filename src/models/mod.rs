//! Data model for the assistant chat domain.

mod message;
mod request;
mod session;

pub use message::{Attachment, Message, MessageMetadata, MessageRole, MessageStatus, QuickAction};
pub use request::{CreateSessionRequest, SmartQuestionsResponse, StreamRequest};
pub use session::Session;
