//! Cursor navigation algorithms.
//!
//! Every operation here reads and mutates only the cursor and scroll
//! fields of a [`Document`]; content is never touched.

use crate::document::Document;
use crate::SCROLL_RIGHT_MARGIN;

/// Character class for word movement. Alphanumeric runs and punctuation
/// runs are mutually exclusive tokens; whitespace separates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Word,
    Punct,
    Space,
}

/// Classify a character for word movement.
pub fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Space
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

impl Document {
    /// Move one character left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor_x > 0 {
            self.cursor_x -= 1;
        } else if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = self.current_line().len();
        }
    }

    /// Move one character right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor_x < self.current_line().len() {
            self.cursor_x += 1;
        } else if self.cursor_y + 1 < self.line_count() {
            self.cursor_y += 1;
            self.cursor_x = 0;
        }
    }

    /// Move one line up, clamping the column to the destination length.
    pub fn move_up(&mut self) {
        if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = self.cursor_x.min(self.current_line().len());
        }
    }

    /// Move one line down, clamping the column to the destination length.
    pub fn move_down(&mut self) {
        if self.cursor_y + 1 < self.line_count() {
            self.cursor_y += 1;
            self.cursor_x = self.cursor_x.min(self.current_line().len());
        }
    }

    /// Toggle between the first non-whitespace column and column 0.
    pub fn move_line_start(&mut self) {
        let first = self.current_line().first_non_whitespace();
        if self.cursor_x == first {
            self.cursor_x = 0;
        } else {
            self.cursor_x = first;
        }
    }

    /// Move to the end of the current line.
    pub fn move_line_end(&mut self) {
        self.cursor_x = self.current_line().len();
    }

    /// Move forward one word: skip the rest of the token under the cursor,
    /// then any trailing whitespace. At end of line, wrap to the next line.
    pub fn move_word_forward(&mut self) {
        let chars: Vec<char> = self.current_line().as_str().chars().collect();

        if self.cursor_x >= chars.len() {
            if self.cursor_y + 1 < self.line_count() {
                self.cursor_y += 1;
                self.cursor_x = 0;
            }
            return;
        }

        let mut x = self.cursor_x;
        let class = char_class(chars[x]);
        if class != CharClass::Space {
            while x < chars.len() && char_class(chars[x]) == class {
                x += 1;
            }
        }
        while x < chars.len() && char_class(chars[x]) == CharClass::Space {
            x += 1;
        }
        self.cursor_x = x;
    }

    /// Move backward one word, mirroring [`Self::move_word_forward`] from
    /// one position left of the cursor. At column 0, wrap to the previous
    /// line's end.
    pub fn move_word_backward(&mut self) {
        if self.cursor_x == 0 {
            if self.cursor_y > 0 {
                self.cursor_y -= 1;
                self.cursor_x = self.current_line().len();
            }
            return;
        }

        let chars: Vec<char> = self.current_line().as_str().chars().collect();
        let mut x = self.cursor_x - 1;

        while x > 0 && char_class(chars[x]) == CharClass::Space {
            x -= 1;
        }
        if char_class(chars[x]) != CharClass::Space {
            let class = char_class(chars[x]);
            while x > 0 && char_class(chars[x - 1]) == class {
                x -= 1;
            }
        }
        self.cursor_x = x;
    }

    /// Page up: `height - 1` upward steps, stopping at the first line.
    pub fn page_up(&mut self, height: usize) {
        for _ in 0..height.saturating_sub(1) {
            if self.cursor_y == 0 {
                break;
            }
            self.move_up();
        }
    }

    /// Page down: `height - 1` downward steps, stopping at the last line.
    pub fn page_down(&mut self, height: usize) {
        for _ in 0..height.saturating_sub(1) {
            if self.cursor_y + 1 >= self.line_count() {
                break;
            }
            self.move_down();
        }
    }

    /// Jump to the first character of the document and reset scroll.
    pub fn move_document_start(&mut self) {
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.scroll_x = 0;
        self.scroll_y = 0;
    }

    /// Jump to the end of the last line and scroll the tail into view.
    pub fn move_document_end(&mut self, height: usize) {
        self.cursor_y = self.line_count() - 1;
        self.cursor_x = self.current_line().len();
        self.scroll_y = self.line_count().saturating_sub(height);
    }

    /// Go to a 1-based line number, clamped to the document.
    ///
    /// The column resets to 0. The view scrolls only if the target falls
    /// outside the current viewport (minimal-scroll policy).
    pub fn goto_line(&mut self, n: usize, height: usize) {
        let target = n.clamp(1, self.line_count()) - 1;
        self.cursor_y = target;
        self.cursor_x = 0;

        if target < self.scroll_y {
            self.scroll_y = target;
        } else if height > 0 && target >= self.scroll_y + height {
            self.scroll_y = target + 1 - height;
        }
    }

    /// Go to a column on the current line, clamped to the line length,
    /// keeping a fixed right margin visible.
    pub fn goto_column(&mut self, c: usize, width: usize) {
        self.cursor_x = c.min(self.current_line().len());

        if self.cursor_x < self.scroll_x {
            self.scroll_x = self.cursor_x;
        } else if width > SCROLL_RIGHT_MARGIN
            && self.cursor_x >= self.scroll_x + width - SCROLL_RIGHT_MARGIN
        {
            self.scroll_x = self.cursor_x + SCROLL_RIGHT_MARGIN + 1 - width;
        }
    }

    /// Jump to the bracket matching the one under the cursor.
    ///
    /// Scans within the current line only, tracking nesting depth per
    /// bracket kind. The cursor stays put when the character under it is
    /// not a bracket or its match does not close within the line.
    pub fn match_bracket(&mut self) {
        let chars: Vec<char> = self.current_line().as_str().chars().collect();
        let Some(&ch) = chars.get(self.cursor_x) else {
            return;
        };

        let (open, close, forward) = match ch {
            '(' => ('(', ')', true),
            '[' => ('[', ']', true),
            '{' => ('{', '}', true),
            ')' => ('(', ')', false),
            ']' => ('[', ']', false),
            '}' => ('{', '}', false),
            _ => return,
        };

        let mut depth = 0i32;
        if forward {
            for (i, &c) in chars.iter().enumerate().skip(self.cursor_x) {
                if c == open {
                    depth += 1;
                } else if c == close {
                    depth -= 1;
                    if depth == 0 {
                        self.cursor_x = i;
                        return;
                    }
                }
            }
        } else {
            for i in (0..=self.cursor_x).rev() {
                let c = chars[i];
                if c == close {
                    depth += 1;
                } else if c == open {
                    depth -= 1;
                    if depth == 0 {
                        self.cursor_x = i;
                        return;
                    }
                }
            }
        }
    }

    /// Center the view on the cursor line.
    pub fn center_view(&mut self, height: usize) {
        let half = height / 2;
        let max_scroll = self.line_count().saturating_sub(height);
        self.scroll_y = self.cursor_y.saturating_sub(half).min(max_scroll);
    }

    /// Scroll minimally so the cursor is inside the viewport.
    ///
    /// Run after every processed key event, together with the cursor
    /// clamp, as the structural safety net.
    pub fn scroll_to_cursor(&mut self, width: usize, height: usize) {
        if self.cursor_y < self.scroll_y {
            self.scroll_y = self.cursor_y;
        } else if height > 0 && self.cursor_y >= self.scroll_y + height {
            self.scroll_y = self.cursor_y + 1 - height;
        }

        if self.cursor_x < self.scroll_x {
            self.scroll_x = self.cursor_x;
        } else if width > 0 && self.cursor_x >= self.scroll_x + width {
            self.scroll_x = self.cursor_x + 1 - width;
        }
    }
}
