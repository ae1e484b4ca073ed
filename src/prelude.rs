//! Convenience re-exports for typical usage.
//!
//! ```no_run
//! use shopmate::prelude::*;
//!
//! # async fn run() -> Result<(), SendError> {
//! let api = AssistantApi::new(ReqwestHttpClient::new(), StaticTokenProvider::anonymous());
//! let mut store = ChatStore::new(api);
//! let outcome = store.send_streaming("where is my order?", Vec::new(), None, None).await?;
//! println!("{}", outcome.message.content);
//! # Ok(())
//! # }
//! ```

pub use crate::adapters::mock::StaticTokenProvider;
pub use crate::adapters::ReqwestHttpClient;
pub use crate::api::{ApiError, AssistantApi, DEFAULT_BASE_URL};
pub use crate::error::SendError;
pub use crate::models::{Attachment, Message, MessageRole, MessageStatus, Session, StreamRequest};
pub use crate::store::{ChatStore, ChatStoreConfig, StreamOutcome};
pub use crate::stream::{CancelToken, DeltaSink, StreamPhase, StreamReducer};
pub use crate::traits::{HttpClient, HttpError, TokenProvider};
