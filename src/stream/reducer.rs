//! Event application onto a live assistant message.

use crate::models::{Message, MessageStatus};
use crate::sse::StreamEvent;

/// Lifecycle of one streaming exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// Placeholder created, no event observed yet
    Init,
    /// At least one event applied
    Streaming,
    /// `end` observed; message is immutable
    Complete,
    /// Transport failure
    Failed,
    /// Caller aborted; accumulated content retained
    Cancelled,
}

impl StreamPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamPhase::Complete | StreamPhase::Failed | StreamPhase::Cancelled
        )
    }
}

/// Observer for incremental content deltas.
///
/// Notified synchronously, in event order: the sink never sees delta N+1
/// before delta N's effect is applied to the message.
pub trait DeltaSink {
    fn on_delta(&mut self, delta: &str);
}

impl<F: FnMut(&str)> DeltaSink for F {
    fn on_delta(&mut self, delta: &str) {
        self(delta)
    }
}

/// State machine building up one assistant message from stream events.
///
/// The reducer borrows the caller-owned placeholder and mutates it in place:
/// the message the caller holds (typically an entry in the visible message
/// list) is the live view of the stream, accumulating content as events apply.
/// Once a terminal phase is reached, every further event is a no-op: nothing
/// can truncate, reorder, or extend already-final content.
#[derive(Debug)]
pub struct StreamReducer<'a> {
    message: &'a mut Message,
    phase: StreamPhase,
}

impl<'a> StreamReducer<'a> {
    /// Attach to the placeholder message the stream will fill in.
    pub fn new(message: &'a mut Message) -> Self {
        Self {
            message,
            phase: StreamPhase::Init,
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// The in-progress message.
    pub fn message(&self) -> &Message {
        self.message
    }

    /// Apply one event, notifying the sink for content deltas.
    pub fn apply(&mut self, event: StreamEvent, mut sink: Option<&mut (dyn DeltaSink + '_)>) {
        if self.phase.is_terminal() {
            tracing::debug!(
                event = event.event_type_name(),
                "event after terminal phase dropped"
            );
            return;
        }
        // An unrecognized event leaves the machine exactly where it was.
        if matches!(event, StreamEvent::Unrecognized) {
            tracing::warn!("unrecognized stream event dropped");
            return;
        }
        self.phase = StreamPhase::Streaming;

        match event {
            StreamEvent::Intent { intent } => {
                self.message.metadata.intent = Some(intent);
            }
            StreamEvent::Thinking { content } => {
                // Replacement snapshot, not an append
                self.message.metadata.thinking = Some(content);
            }
            StreamEvent::Content { delta } => {
                self.message.append_delta(&delta);
                if let Some(sink) = sink.as_deref_mut() {
                    sink.on_delta(&delta);
                }
            }
            StreamEvent::End {
                sources,
                quick_actions,
            } => {
                self.message.metadata.sources = sources;
                self.message.metadata.quick_actions = quick_actions;
                self.transition(StreamPhase::Complete, MessageStatus::Complete);
            }
            StreamEvent::Unrecognized => {}
        }
    }

    /// End of stream without an `end` event: accept what arrived as final.
    pub fn finish(&mut self) {
        if !self.phase.is_terminal() {
            tracing::debug!("stream ended without terminal event");
            self.transition(StreamPhase::Complete, MessageStatus::Complete);
        }
    }

    /// Mark the exchange failed; accumulated content is retained.
    pub fn fail(&mut self) {
        if !self.phase.is_terminal() {
            self.transition(StreamPhase::Failed, MessageStatus::Failed);
        }
    }

    /// Mark the exchange cancelled; accumulated content is retained but the
    /// message is never reported complete.
    pub fn cancel(&mut self) {
        if !self.phase.is_terminal() {
            self.transition(StreamPhase::Cancelled, MessageStatus::Cancelled);
        }
    }

    fn transition(&mut self, phase: StreamPhase, status: MessageStatus) {
        self.phase = phase;
        self.message.status = status;
    }
}
