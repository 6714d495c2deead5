use serde::{Deserialize, Serialize};

use crate::error::BufferError;

/// The host document a finished drawing is spliced into.
///
/// Positions are byte offsets into [`TextBuffer::full_text`].
pub trait TextBuffer {
    fn cursor_position(&self) -> usize;
    fn insert_text_at(&mut self, position: usize, text: &str) -> Result<(), BufferError>;
    fn full_text(&self) -> &str;
}

/// Plain document text with a caret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBuffer {
    text: String,
    cursor: usize,
}

impl DocumentBuffer {
    /// Caret starts at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for text widgets. The caret is clamped afterwards by
    /// [`DocumentBuffer::set_cursor_char`].
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Move the caret to a character index, as reported by text widgets.
    /// Indices past the end clamp to the end.
    pub fn set_cursor_char(&mut self, char_index: usize) {
        self.cursor = self
            .text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(byte, _)| byte);
    }

    /// Caret as a character index.
    pub fn cursor_char(&self) -> usize {
        let cursor = self.cursor.min(self.text.len());
        self.text
            .char_indices()
            .take_while(|(byte, _)| *byte < cursor)
            .count()
    }
}

impl TextBuffer for DocumentBuffer {
    fn cursor_position(&self) -> usize {
        self.cursor.min(self.text.len())
    }

    fn insert_text_at(&mut self, position: usize, text: &str) -> Result<(), BufferError> {
        if position > self.text.len() {
            return Err(BufferError::OutOfBounds {
                position,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(position) {
            return Err(BufferError::NotCharBoundary(position));
        }
        self.text.insert_str(position, text);
        if self.cursor >= position {
            self.cursor += text.len();
        }
        Ok(())
    }

    fn full_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_cursor_moves_cursor() {
        let mut buffer = DocumentBuffer::new("ab");
        buffer.set_cursor_char(1);
        let at = buffer.cursor_position();
        buffer.insert_text_at(at, "XY").unwrap();
        assert_eq!(buffer.full_text(), "aXYb");
        assert_eq!(buffer.cursor_position(), 3);
    }

    #[test]
    fn test_insert_after_cursor_keeps_cursor() {
        let mut buffer = DocumentBuffer::new("abc");
        buffer.set_cursor_char(0);
        buffer.insert_text_at(3, "!").unwrap();
        assert_eq!(buffer.full_text(), "abc!");
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn test_rejects_bad_positions() {
        let mut buffer = DocumentBuffer::new("é");
        assert_eq!(
            buffer.insert_text_at(5, "x"),
            Err(BufferError::OutOfBounds { position: 5, len: 2 })
        );
        assert_eq!(buffer.insert_text_at(1, "x"), Err(BufferError::NotCharBoundary(1)));
        assert_eq!(buffer.full_text(), "é");
    }

    #[test]
    fn test_char_cursor_conversion() {
        let mut buffer = DocumentBuffer::new("héllo");
        buffer.set_cursor_char(2);
        assert_eq!(buffer.cursor_position(), 3);
        assert_eq!(buffer.cursor_char(), 2);

        buffer.set_cursor_char(99);
        assert_eq!(buffer.cursor_position(), buffer.full_text().len());
        assert_eq!(buffer.cursor_char(), 5);
    }
}
