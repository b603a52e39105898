//! Character stream over in-memory source text
//!
//! The scanner pulls characters through [`StreamReader`] one at a time and only
//! ever needs a single character of lookahead, which [`StreamReader::peek`]
//! provides without consuming it.

/// Random-access character stream with a read cursor.
#[derive(Debug, Clone, Default)]
pub struct StreamReader {
    chars: Vec<char>,
    position: usize,
}

impl StreamReader {
    /// Create a reader positioned before the first character of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            position: 0,
        }
    }

    /// Consume the character under the cursor, or `None` once exhausted.
    pub fn read(&mut self) -> Option<char> {
        let ch = self.chars.get(self.position).copied()?;
        self.position += 1;
        Some(ch)
    }

    /// Look at the next unread character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    pub fn end_of_stream(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }
}
