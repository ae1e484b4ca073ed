//! Frame payload parsing.

use super::StreamEvent;

/// Literal prefix marking the payload line of a frame.
pub const DATA_PREFIX: &str = "data: ";

/// Parse one complete frame into a typed event.
///
/// Pure and stateless. Only the `data: ` line of a frame carries meaning;
/// every other line is ignored. A frame without a data line, with invalid
/// JSON, or with an absent `type` maps to [`StreamEvent::Unrecognized`] -
/// malformed input from one frame never interrupts the stream.
pub fn parse_frame(frame: &str) -> StreamEvent {
    let Some(payload) = data_payload(frame) else {
        tracing::debug!("frame without data line ignored");
        return StreamEvent::Unrecognized;
    };

    match serde_json::from_str::<StreamEvent>(payload) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "malformed stream frame dropped");
            StreamEvent::Unrecognized
        }
    }
}

/// Extract the payload of the first `data: ` line, tolerating trailing CR.
fn data_payload(frame: &str) -> Option<&str> {
    frame.lines().find_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.strip_prefix(DATA_PREFIX)
    })
}
