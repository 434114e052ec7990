//! In-place edit operations.
//!
//! Character, line, and word level mutations of a [`Document`]. Every
//! operation here sets the modified flag and keeps the cursor invariants
//! intact on its own; the per-key clamp is only a safety net.

use crate::document::Document;
use crate::line::Line;
use crate::navigate::{char_class, CharClass};

impl Document {
    /// Insert a character at the cursor and advance past it.
    pub fn insert_char(&mut self, ch: char) {
        let x = self.cursor_x;
        self.current_line_mut().insert_char(x, ch);
        self.cursor_x += 1;
        self.set_modified();
    }

    /// Insert a fixed-width run of spaces (Tab in insert mode).
    pub fn insert_tab(&mut self, tab_size: usize) {
        for _ in 0..tab_size {
            self.insert_char(' ');
        }
    }

    /// Delete the character before the cursor. At column 0, join with the
    /// previous line and leave the cursor at the former join point.
    pub fn backspace(&mut self) {
        if self.cursor_x > 0 {
            let x = self.cursor_x - 1;
            self.current_line_mut().remove_char(x);
            self.cursor_x = x;
            self.set_modified();
        } else if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.join_with_next();
        }
    }

    /// Delete the character under the cursor. At end of line, join with
    /// the next line.
    pub fn delete_char(&mut self) {
        let x = self.cursor_x;
        if x < self.current_line().len() {
            self.current_line_mut().remove_char(x);
            self.set_modified();
        } else {
            self.join_with_next();
        }
    }

    /// Split the line at the cursor (Enter in insert mode).
    ///
    /// With auto-indent, the new line inherits the previous line's leading
    /// whitespace, plus one extra indent unit when that line's last
    /// non-whitespace character is an opening brace. The cursor lands
    /// after the copied indentation.
    pub fn insert_newline(&mut self, auto_indent: bool, tab_size: usize) {
        self.split_at_cursor();

        if !auto_indent {
            return;
        }

        let prev = self.line(self.cursor_y - 1).expect("previous line exists");
        let mut indent = prev.leading_whitespace();
        if prev.as_str().trim_end().ends_with('{') {
            indent.push_str(&" ".repeat(tab_size));
        }

        if !indent.is_empty() {
            self.current_line_mut().insert_str(0, &indent);
            self.cursor_x = indent.chars().count();
        }
    }

    /// Delete the line under the cursor (single-line-safe).
    pub fn delete_current_line(&mut self) {
        self.delete_line(self.cursor_y);
    }

    /// Delete from the cursor to the end of the line.
    pub fn delete_to_line_end(&mut self) {
        let x = self.cursor_x;
        let len = self.current_line().len();
        if x < len {
            self.current_line_mut().remove_range(x, len);
            self.set_modified();
        }
    }

    /// Duplicate the current line below itself.
    pub fn duplicate_line(&mut self) {
        let copy = Line::from_text(self.current_line().as_str());
        self.insert_line(self.cursor_y + 1, copy);
    }

    /// Swap the current line's content with the line above and follow it.
    pub fn move_line_up(&mut self) {
        if self.cursor_y == 0 {
            return;
        }
        self.swap_line_contents(self.cursor_y, self.cursor_y - 1);
        self.cursor_y -= 1;
    }

    /// Swap the current line's content with the line below and follow it.
    pub fn move_line_down(&mut self) {
        if self.cursor_y + 1 >= self.line_count() {
            return;
        }
        self.swap_line_contents(self.cursor_y, self.cursor_y + 1);
        self.cursor_y += 1;
    }

    // Content swap rather than node relinking: keeps indices stable.
    fn swap_line_contents(&mut self, a: usize, b: usize) {
        let text_a = self.line(a).map(|l| l.as_str().to_string());
        let text_b = self.line(b).map(|l| l.as_str().to_string());
        if let (Some(text_a), Some(text_b)) = (text_a, text_b) {
            self.line_mut(a).expect("line exists").set_content(text_b);
            self.line_mut(b).expect("line exists").set_content(text_a);
            self.set_modified();
        }
    }

    /// Insert whole lines after the cursor line, in order.
    ///
    /// Used by paste; the cursor moves to the first inserted line.
    pub fn insert_lines_below(&mut self, lines: &[String]) {
        for (i, text) in lines.iter().enumerate() {
            self.insert_line(self.cursor_y + 1 + i, Line::from_text(text.clone()));
        }
        if !lines.is_empty() {
            self.cursor_y += 1;
            self.cursor_x = 0;
        }
    }

    /// Indent the current line by one indent unit; the cursor shifts by
    /// the count added.
    pub fn indent_line(&mut self, tab_size: usize) {
        self.current_line_mut().insert_str(0, &" ".repeat(tab_size));
        self.cursor_x += tab_size;
        self.set_modified();
    }

    /// Remove up to one indent unit of leading spaces; never removes
    /// non-space characters. The cursor shifts by the count removed.
    pub fn unindent_line(&mut self, tab_size: usize) {
        let leading_spaces = self
            .current_line()
            .as_str()
            .chars()
            .take(tab_size)
            .take_while(|c| *c == ' ')
            .count();
        if leading_spaces == 0 {
            return;
        }
        self.current_line_mut().remove_range(0, leading_spaces);
        self.cursor_x = self.cursor_x.saturating_sub(leading_spaces);
        self.set_modified();
    }

    /// Uppercase the alphanumeric run containing the cursor.
    pub fn uppercase_word(&mut self) {
        self.transform_word(|s| s.to_uppercase());
    }

    /// Lowercase the alphanumeric run containing the cursor.
    pub fn lowercase_word(&mut self) {
        self.transform_word(|s| s.to_lowercase());
    }

    fn transform_word(&mut self, f: impl Fn(&str) -> String) {
        let Some((start, end)) = self.word_bounds_at_cursor() else {
            return;
        };
        let word: String = self
            .current_line()
            .as_str()
            .chars()
            .skip(start)
            .take(end - start)
            .collect();
        let replaced = f(&word);
        self.current_line_mut().replace_range(start, end, &replaced);
        self.set_modified();
    }

    /// Swap the two characters around the cursor.
    pub fn transpose_chars(&mut self) {
        let chars: Vec<char> = self.current_line().as_str().chars().collect();
        if chars.len() < 2 {
            return;
        }
        // Pick the adjacent pair: before+under normally, the last two at
        // the line edges.
        let i = if self.cursor_x == 0 {
            0
        } else if self.cursor_x >= chars.len() {
            chars.len() - 2
        } else {
            self.cursor_x - 1
        };

        let swapped: String = [chars[i + 1], chars[i]].iter().collect();
        self.current_line_mut().replace_range(i, i + 2, &swapped);
        self.set_modified();
    }

    /// Bounds `[start, end)` of the alphanumeric run containing the
    /// cursor, or `None` when the cursor is not on one.
    fn word_bounds_at_cursor(&self) -> Option<(usize, usize)> {
        let chars: Vec<char> = self.current_line().as_str().chars().collect();
        let x = self.cursor_x;
        if x >= chars.len() || char_class(chars[x]) != CharClass::Word {
            return None;
        }

        let mut start = x;
        while start > 0 && char_class(chars[start - 1]) == CharClass::Word {
            start -= 1;
        }
        let mut end = x + 1;
        while end < chars.len() && char_class(chars[end]) == CharClass::Word {
            end += 1;
        }
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        let mut doc = Document::new();
        doc.current_line_mut().set_content(lines[0]);
        for (i, text) in lines.iter().enumerate().skip(1) {
            doc.insert_line(i, Line::from_text(*text));
        }
        doc
    }

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut d = Document::new();
        d.insert_char('h');
        d.insert_char('i');
        assert_eq!(d.current_line().as_str(), "hi");
        assert_eq!(d.cursor_x, 2);
        assert!(d.is_modified());
    }

    #[test]
    fn test_backspace_at_column_zero_joins() {
        let mut d = doc(&["abc", "def"]);
        d.cursor_y = 1;
        d.cursor_x = 0;
        d.backspace();
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.current_line().as_str(), "abcdef");
        assert_eq!((d.cursor_y, d.cursor_x), (0, 3));
    }

    #[test]
    fn test_backspace_to_empty_keeps_one_line() {
        let mut d = doc(&["abc"]);
        d.cursor_x = 3;
        for _ in 0..3 {
            d.backspace();
        }
        assert_eq!(d.current_line().as_str(), "");
        assert_eq!(d.line_count(), 1);
        // Further backspaces at (0,0) are no-ops
        d.backspace();
        assert_eq!(d.line_count(), 1);
    }

    #[test]
    fn test_delete_at_eol_joins_next() {
        let mut d = doc(&["ab", "cd"]);
        d.cursor_x = 2;
        d.delete_char();
        assert_eq!(d.current_line().as_str(), "abcd");
        assert_eq!(d.cursor_x, 2);
    }

    #[test]
    fn test_insert_newline_copies_indent() {
        let mut d = doc(&["    body"]);
        d.cursor_x = 8;
        d.insert_newline(true, 4);
        assert_eq!(d.line(1).unwrap().as_str(), "    ");
        assert_eq!((d.cursor_y, d.cursor_x), (1, 4));
    }

    #[test]
    fn test_insert_newline_extra_indent_after_brace() {
        let mut d = doc(&["  if x {"]);
        d.cursor_x = 8;
        d.insert_newline(true, 4);
        assert_eq!(d.line(1).unwrap().as_str(), "      ");
        assert_eq!(d.cursor_x, 6);
    }

    #[test]
    fn test_insert_newline_without_auto_indent() {
        let mut d = doc(&["    body"]);
        d.cursor_x = 8;
        d.insert_newline(false, 4);
        assert_eq!(d.line(1).unwrap().as_str(), "");
        assert_eq!((d.cursor_y, d.cursor_x), (1, 0));
    }

    #[test]
    fn test_duplicate_line() {
        let mut d = doc(&["x=1", "y=2"]);
        d.duplicate_line();
        assert_eq!(d.line_count(), 3);
        assert_eq!(d.line(1).unwrap().as_str(), "x=1");
        assert_eq!(d.line(2).unwrap().as_str(), "y=2");
    }

    #[test]
    fn test_move_line_down_swaps_content() {
        let mut d = doc(&["first", "second"]);
        d.move_line_down();
        assert_eq!(d.line(0).unwrap().as_str(), "second");
        assert_eq!(d.line(1).unwrap().as_str(), "first");
        assert_eq!(d.cursor_y, 1);
        // At the bottom edge, nothing happens
        d.move_line_down();
        assert_eq!(d.cursor_y, 1);
    }

    #[test]
    fn test_insert_lines_below() {
        let mut d = doc(&["top", "bottom"]);
        d.insert_lines_below(&["a".to_string(), "b".to_string()]);
        assert_eq!(d.line_count(), 4);
        assert_eq!(d.line(1).unwrap().as_str(), "a");
        assert_eq!(d.line(2).unwrap().as_str(), "b");
        assert_eq!((d.cursor_y, d.cursor_x), (1, 0));
    }

    #[test]
    fn test_indent_unindent_cursor_shift() {
        let mut d = doc(&["  x"]);
        d.cursor_x = 2;
        d.indent_line(4);
        assert_eq!(d.current_line().as_str(), "      x");
        assert_eq!(d.cursor_x, 6);

        d.unindent_line(4);
        assert_eq!(d.current_line().as_str(), "  x");
        assert_eq!(d.cursor_x, 2);

        // Only two spaces left; unindent removes both, not the 'x'
        d.unindent_line(4);
        assert_eq!(d.current_line().as_str(), "x");
        assert_eq!(d.cursor_x, 0);

        d.unindent_line(4);
        assert_eq!(d.current_line().as_str(), "x");
    }

    #[test]
    fn test_case_transforms() {
        let mut d = doc(&["let word = 1"]);
        d.cursor_x = 5;
        d.uppercase_word();
        assert_eq!(d.current_line().as_str(), "let WORD = 1");
        d.lowercase_word();
        assert_eq!(d.current_line().as_str(), "let word = 1");
    }

    #[test]
    fn test_case_transform_off_word_is_noop() {
        let mut d = doc(&["a  b"]);
        d.cursor_x = 1;
        d.uppercase_word();
        assert_eq!(d.current_line().as_str(), "a  b");
    }

    #[test]
    fn test_transpose() {
        let mut d = doc(&["abcd"]);
        d.cursor_x = 2;
        d.transpose_chars();
        assert_eq!(d.current_line().as_str(), "acbd");

        let mut d = doc(&["ab"]);
        d.cursor_x = 0;
        d.transpose_chars();
        assert_eq!(d.current_line().as_str(), "ba");

        let mut d = doc(&["x"]);
        d.transpose_chars();
        assert_eq!(d.current_line().as_str(), "x");
    }

    #[test]
    fn test_delete_to_line_end() {
        let mut d = doc(&["keep this"]);
        d.cursor_x = 4;
        d.delete_to_line_end();
        assert_eq!(d.current_line().as_str(), "keep");
    }
}
