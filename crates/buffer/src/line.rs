//! A single line of text.

use unicode_width::UnicodeWidthChar;

/// An owned, growable span of characters; the atomic unit of text storage.
///
/// All public offsets are character indices, not byte indices. The `dirty`
/// flag is set whenever the content changes and cleared by the renderer
/// once the line has been painted.
#[derive(Debug, Clone, Default)]
pub struct Line {
    content: String,
    dirty: bool,
}

impl Line {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from existing text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            dirty: true,
        }
    }

    /// Line content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// True when the line holds no characters.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Character at the given index.
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.content.chars().nth(idx)
    }

    /// Byte offset of the given character index (content length if past end).
    fn byte_index(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the given character index.
    pub fn insert_char(&mut self, idx: usize, ch: char) {
        let byte = self.byte_index(idx);
        self.content.insert(byte, ch);
        self.dirty = true;
    }

    /// Insert a string at the given character index.
    pub fn insert_str(&mut self, idx: usize, text: &str) {
        let byte = self.byte_index(idx);
        self.content.insert_str(byte, text);
        self.dirty = true;
    }

    /// Remove and return the character at the given index.
    pub fn remove_char(&mut self, idx: usize) -> Option<char> {
        if idx >= self.len() {
            return None;
        }
        let byte = self.byte_index(idx);
        let ch = self.content.remove(byte);
        self.dirty = true;
        Some(ch)
    }

    /// Remove the character range `[start, end)` (character indices).
    pub fn remove_range(&mut self, start: usize, end: usize) {
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        self.content.replace_range(start_byte..end_byte, "");
        self.dirty = true;
    }

    /// Replace the character range `[start, end)` with new text.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        self.content.replace_range(start_byte..end_byte, text);
        self.dirty = true;
    }

    /// Append text to the end of the line.
    pub fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
        self.dirty = true;
    }

    /// Truncate at the given character index, returning the tail.
    pub fn split_off(&mut self, idx: usize) -> String {
        let byte = self.byte_index(idx);
        let tail = self.content.split_off(byte);
        self.dirty = true;
        tail
    }

    /// Replace the whole content.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.dirty = true;
    }

    /// Leading whitespace of the line.
    pub fn leading_whitespace(&self) -> String {
        self.content
            .chars()
            .take_while(|c| c.is_whitespace())
            .collect()
    }

    /// Index of the first non-whitespace character (0 if the line is blank).
    pub fn first_non_whitespace(&self) -> usize {
        self.content
            .chars()
            .position(|c| !c.is_whitespace())
            .unwrap_or(0)
    }

    /// Display width in terminal columns up to the given character index.
    ///
    /// Used to translate a character cursor into a screen column.
    pub fn width_to(&self, char_idx: usize) -> usize {
        self.content
            .chars()
            .take(char_idx)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// True once modified since the last paint.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after painting.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut line = Line::from_text("hllo");
        line.insert_char(1, 'e');
        assert_eq!(line.as_str(), "hello");
        assert_eq!(line.remove_char(4), Some('o'));
        assert_eq!(line.as_str(), "hell");
        assert_eq!(line.remove_char(10), None);
    }

    #[test]
    fn test_char_offsets_are_not_bytes() {
        let mut line = Line::from_text("héllo");
        line.insert_char(5, '!');
        assert_eq!(line.as_str(), "héllo!");
        assert_eq!(line.len(), 6);
    }

    #[test]
    fn test_split_off() {
        let mut line = Line::from_text("hello world");
        let tail = line.split_off(5);
        assert_eq!(line.as_str(), "hello");
        assert_eq!(tail, " world");
    }

    #[test]
    fn test_leading_whitespace() {
        let line = Line::from_text("    x = 1");
        assert_eq!(line.leading_whitespace(), "    ");
        assert_eq!(line.first_non_whitespace(), 4);
    }

    #[test]
    fn test_first_non_whitespace_blank_line() {
        let line = Line::from_text("   ");
        assert_eq!(line.first_non_whitespace(), 0);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut line = Line::new();
        assert!(!line.is_dirty());
        line.push_str("x");
        assert!(line.is_dirty());
        line.mark_clean();
        assert!(!line.is_dirty());
    }

    #[test]
    fn test_width_to_wide_chars() {
        let line = Line::from_text("a漢b");
        assert_eq!(line.width_to(1), 1);
        assert_eq!(line.width_to(2), 3);
        assert_eq!(line.width_to(3), 4);
    }
}
