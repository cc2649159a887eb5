//! Newline-delimited record framing.
//!
//! Network chunks do not line up with records: one chunk may hold several
//! records, and one record (or one multi-byte UTF-8 character) may be split
//! across chunks. [`LineDecoder`] buffers bytes and only releases complete
//! lines; the trailing partial line waits for the next chunk.

/// Incremental splitter of a byte stream into non-blank lines.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no `\n`
    scanned: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completed.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped and blank lines dropped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        let mut from = self.scanned;
        while let Some(offset) = self.buffer[from..].iter().position(|&b| b == b'\n') {
            let end = from + offset;
            if let Some(line) = clean(&self.buffer[start..end]) {
                lines.push(line);
            }
            start = end + 1;
            from = start;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();
        lines
    }

    /// Flush the unterminated remainder at end of input.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        let rest = std::mem::take(&mut self.buffer);
        self.scanned = 0;
        clean(&rest)
    }

    /// Number of buffered bytes still waiting for a terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn clean(line: &[u8]) -> Option<Vec<u8>> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(line.to_vec())
    }
}
