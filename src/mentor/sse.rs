/// Accumulates a server-sent-event body and hands out complete event blocks.
/// Works on bytes so a UTF-8 sequence split across network chunks stays intact.
#[derive(Default)]
pub struct SseBuffer {
    buffer: Vec<u8>,
}

impl SseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));
    }

    pub fn next_event_block(&mut self) -> Option<String> {
        let boundary = self.buffer.windows(2).position(|w| w == b"\n\n")?;
        let rest = self.buffer.split_off(boundary + 2);
        let block = std::mem::replace(&mut self.buffer, rest);
        Some(String::from_utf8_lossy(&block).into_owned())
    }

    /// Whatever is left once the body ends without a trailing blank line.
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.buffer.iter().all(|b| b.is_ascii_whitespace()) {
            self.buffer.clear();
            return None;
        }
        let block = std::mem::take(&mut self.buffer);
        Some(String::from_utf8_lossy(&block).into_owned())
    }
}

pub fn parse_data_lines(event_block: &str) -> Vec<&str> {
    event_block
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines_across_chunks() {
        let mut buf = SseBuffer::new();
        buf.push_chunk(b"data: {\"a\":1}\n");
        assert!(buf.next_event_block().is_none());
        buf.push_chunk(b"\ndata: {\"b\":2}\n\ndata: tail");

        let first = buf.next_event_block().unwrap();
        assert_eq!(parse_data_lines(&first), ["{\"a\":1}"]);
        let second = buf.next_event_block().unwrap();
        assert_eq!(parse_data_lines(&second), ["{\"b\":2}"]);
        assert!(buf.next_event_block().is_none());
        assert_eq!(buf.take_remainder().as_deref(), Some("data: tail"));
        assert!(buf.take_remainder().is_none());
    }

    #[test]
    fn tolerates_crlf_framing() {
        let mut buf = SseBuffer::new();
        buf.push_chunk(b"data: one\r\n\r\ndata: two\r\n\r\n");
        assert_eq!(buf.next_event_block().as_deref(), Some("data: one\n\n"));
        assert_eq!(buf.next_event_block().as_deref(), Some("data: two\n\n"));
    }

    #[test]
    fn keeps_multibyte_text_split_between_chunks() {
        let text = "data: n\u{e9}on\n\n".as_bytes();
        let split = text.iter().position(|b| *b == 0xc3).unwrap() + 1;
        let mut buf = SseBuffer::new();
        buf.push_chunk(&text[..split]);
        buf.push_chunk(&text[split..]);
        let block = buf.next_event_block().unwrap();
        assert_eq!(parse_data_lines(&block), ["n\u{e9}on"]);
    }

    #[test]
    fn ignores_comments_and_other_fields() {
        let block = ": keep-alive\nevent: message\ndata:{\"x\":true}\nid: 4\n\n";
        assert_eq!(parse_data_lines(block), ["{\"x\":true}"]);
    }
}
