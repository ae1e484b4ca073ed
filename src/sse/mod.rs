//! Streaming wire-format handling.
//!
//! The streaming chat endpoint sends a sequence of UTF-8 text frames separated
//! by a blank line (`"\n\n"`). Within a frame, only lines beginning with
//! `"data: "` carry a payload: a JSON object with a `type` discriminator.
//!
//! # Module structure
//! - `decoder` - byte-level reassembly of frames across arbitrary chunk
//!   boundaries (`FrameDecoder`)
//! - `events` - the typed event set (`StreamEvent`)
//! - `parser` - frame payload to `StreamEvent` (`parse_frame`)

mod decoder;
mod events;
mod parser;

pub use decoder::FrameDecoder;
pub use events::StreamEvent;
pub use parser::{parse_frame, DATA_PREFIX};
