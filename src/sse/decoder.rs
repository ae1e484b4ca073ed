//! Frame reassembly for the streaming response body.
//!
//! Network chunks arrive with arbitrary boundaries: a chunk may end mid-frame,
//! mid-line, or in the middle of a multi-byte character. The decoder buffers
//! bytes until the terminating blank-line separator has been fully observed,
//! which is why it works on bytes rather than text.

const FRAME_SEPARATOR: &[u8] = b"\n\n";

/// Splits a raw byte stream into complete `"\n\n"`-delimited frames.
///
/// The pending buffer is exclusively owned by one in-flight stream; frames are
/// emitted in strict arrival order and a complete frame is never dropped.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    pending: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of raw bytes, returning every frame it completes.
    ///
    /// Bytes that do not yet form a complete frame stay buffered for the next
    /// call. A separator split across chunks is still recognized.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut start = 0;
        while let Some(offset) = find_separator(&self.pending[start..]) {
            let end = start + offset;
            // A complete frame always falls on a character boundary: multi-byte
            // UTF-8 sequences never contain the 0x0A separator byte.
            frames.push(String::from_utf8_lossy(&self.pending[start..end]).into_owned());
            start = end + FRAME_SEPARATOR.len();
        }
        if start > 0 {
            self.pending.drain(..start);
        }
        frames
    }

    /// Signal end of stream.
    ///
    /// A non-empty unterminated trailing buffer is discarded, never
    /// speculatively parsed.
    pub fn finish(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(
                bytes = self.pending.len(),
                "discarding unterminated trailing frame data"
            );
            self.pending.clear();
        }
    }

    /// Number of buffered bytes not yet forming a complete frame.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

fn find_separator(haystack: &[u8]) -> Option<usize> {
    haystack.windows(FRAME_SEPARATOR.len()).position(|w| w == FRAME_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_frame() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(b"data: {\"type\":\"content\",\"delta\":\"hi\"}\n\n");
        assert_eq!(frames, vec!["data: {\"type\":\"content\",\"delta\":\"hi\"}"]);
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_multiple_frames_in_one_chunk() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(b"data: a\n\ndata: b\n\n");
        assert_eq!(frames, vec!["data: a", "data: b"]);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"data: {\"type\":").is_empty());
        assert!(decoder.feed(b"\"content\",\"delta\":\"x\"}").is_empty());
        let frames = decoder.feed(b"\n\n");
        assert_eq!(frames, vec!["data: {\"type\":\"content\",\"delta\":\"x\"}"]);
    }

    #[test]
    fn test_separator_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"data: a\n").is_empty());
        let frames = decoder.feed(b"\ndata: b\n\n");
        assert_eq!(frames, vec!["data: a", "data: b"]);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        let text = "data: 你好\n\n".as_bytes();
        // Split inside the first multi-byte character
        assert!(decoder.feed(&text[..8]).is_empty());
        let frames = decoder.feed(&text[8..]);
        assert_eq!(frames, vec!["data: 你好"]);
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut decoder = FrameDecoder::new();
        let input = "data: 第一\n\ndata: 二\n\n".as_bytes();
        let mut frames = Vec::new();
        for byte in input {
            frames.extend(decoder.feed(std::slice::from_ref(byte)));
        }
        assert_eq!(frames, vec!["data: 第一", "data: 二"]);
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_empty_chunk_is_noop() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(b"data: partial");
        assert!(decoder.feed(b"").is_empty());
        assert_eq!(decoder.pending_len(), "data: partial".len());
    }

    #[test]
    fn test_finish_discards_trailing_partial() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"data: never terminated").is_empty());
        decoder.finish();
        assert_eq!(decoder.pending_len(), 0);
        // The discarded bytes do not resurface in later frames
        assert_eq!(decoder.feed(b"data: later\n\n"), vec!["data: later"]);
    }

    #[test]
    fn test_crlf_frames_are_not_split_on_crlf() {
        // The wire separator is strictly "\n\n"; CRLF pairs stay inside frames.
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(b"data: a\r\nmore\n\n");
        assert_eq!(frames, vec!["data: a\r\nmore"]);
    }

    #[test]
    fn test_arrival_order_preserved() {
        let mut decoder = FrameDecoder::new();
        let mut frames = Vec::new();
        frames.extend(decoder.feed(b"data: 1\n\nda"));
        frames.extend(decoder.feed(b"ta: 2\n\ndata: 3"));
        frames.extend(decoder.feed(b"\n\n"));
        assert_eq!(frames, vec!["data: 1", "data: 2", "data: 3"]);
    }
}
