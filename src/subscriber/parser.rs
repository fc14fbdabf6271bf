//! Incremental parser for the event-stream wire format.
//!
//! Fed raw transport chunks, yields the payload of each frame at its
//! blank-line terminator. Frames may arrive split across arbitrary chunk
//! boundaries; partial lines are buffered until their newline arrives.
//!
//! Only `data:` fields contribute to the payload (multiple `data:` lines in
//! one frame are joined with `\n` per the event-stream format). Comment
//! lines (leading `:`) and other fields (`event:`, `id:`, `retry:`) are
//! skipped.

/// Stateful event-stream frame parser.
#[derive(Debug, Default)]
pub struct SseFrameParser {
    buffer: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseFrameParser {
    /// Creates an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one transport chunk, returning every frame payload
    /// completed by it, in wire order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(payload) = self.handle_line(line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Processes one complete line; returns a payload when the line is a
    /// frame terminator with buffered data.
    fn handle_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            if self.data_lines.is_empty() {
                return None;
            }
            let payload = self.data_lines.join("\n");
            self.data_lines.clear();
            return Some(payload);
        }
        if line.starts_with(':') {
            return None;
        }
        if let Some(value) = line.strip_prefix("data:") {
            self.data_lines
                .push(value.strip_prefix(' ').unwrap_or(value).to_string());
        }
        None
    }
}
