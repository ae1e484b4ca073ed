//! The streaming state machine.
//!
//! - `reducer` - applies the event sequence of one exchange to a live message
//! - `cancel` - caller-held handle to abort an in-flight send

mod cancel;
mod reducer;

pub use cancel::CancelToken;
pub use reducer::{DeltaSink, StreamPhase, StreamReducer};
