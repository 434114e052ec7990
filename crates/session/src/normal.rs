//! Normal-mode key handling.
//!
//! Single keys map to navigation or single-shot edits; `d`, `y`, `g`,
//! and `z` open a two-key sequence tracked in `pending`.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termod_buffer::Line;
use termod_core::Mode;
use termod_search::SearchDirection;

use crate::session::Session;

impl Session {
    pub(crate) fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(first) = self.pending.take() {
            self.handle_pending(first, key);
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let (width, height) = (self.viewport_width(), self.viewport_height());
        let tab_size = self.options.tab_size;
        let auto_indent = self.options.auto_indent;

        match (key.code, ctrl) {
            // Char navigation
            (KeyCode::Char('h'), false) | (KeyCode::Left, false) => {
                self.current_doc_mut().move_left()
            }
            (KeyCode::Char('l'), false) | (KeyCode::Right, false) => {
                self.current_doc_mut().move_right()
            }
            (KeyCode::Char('k'), false) | (KeyCode::Up, false) => self.current_doc_mut().move_up(),
            (KeyCode::Char('j'), false) | (KeyCode::Down, false) => {
                self.current_doc_mut().move_down()
            }

            // Word navigation
            (KeyCode::Char('w'), false) => self.current_doc_mut().move_word_forward(),
            (KeyCode::Char('b'), false) => self.current_doc_mut().move_word_backward(),

            // Line bounds
            (KeyCode::Char('0'), false) | (KeyCode::Home, false) => {
                self.current_doc_mut().move_line_start()
            }
            (KeyCode::Char('$'), false) | (KeyCode::End, false) => {
                self.current_doc_mut().move_line_end()
            }
            (KeyCode::Char('|'), false) => self.current_doc_mut().goto_column(0, width),

            // Page and document bounds
            (KeyCode::PageUp, false) | (KeyCode::Char('b'), true) => {
                self.current_doc_mut().page_up(height)
            }
            (KeyCode::PageDown, false) | (KeyCode::Char('f'), true) => {
                self.current_doc_mut().page_down(height)
            }
            (KeyCode::Char('G'), false) => self.current_doc_mut().move_document_end(height),

            // Bracket matching
            (KeyCode::Char('%'), false) => self.current_doc_mut().match_bracket(),

            // Two-key sequences
            (KeyCode::Char(first @ ('d' | 'y' | 'g' | 'z')), false) => {
                self.pending = Some(first);
            }

            // Insert-mode entry with positioning side effects
            (KeyCode::Char('i'), false) => self.set_mode(Mode::Insert),
            (KeyCode::Char('a'), false) => {
                self.current_doc_mut().move_right();
                self.set_mode(Mode::Insert);
            }
            (KeyCode::Char('I'), false) => {
                let doc = self.current_doc_mut();
                doc.cursor_x = doc.current_line().first_non_whitespace();
                self.set_mode(Mode::Insert);
            }
            (KeyCode::Char('A'), false) => {
                self.current_doc_mut().move_line_end();
                self.set_mode(Mode::Insert);
            }
            (KeyCode::Char('o'), false) => {
                let doc = self.current_doc_mut();
                doc.move_line_end();
                doc.insert_newline(auto_indent, tab_size);
                self.set_mode(Mode::Insert);
            }
            (KeyCode::Char('O'), false) => {
                let doc = self.current_doc_mut();
                let y = doc.cursor_y;
                doc.insert_line(y, Line::new());
                doc.cursor_x = 0;
                self.set_mode(Mode::Insert);
            }

            // Prompt modes
            (KeyCode::Char(':'), false) => {
                self.command_buffer.clear();
                self.set_mode(Mode::Command);
            }
            (KeyCode::Char('/'), false) => {
                self.search_buffer.clear();
                self.search_direction = SearchDirection::Forward;
                self.set_mode(Mode::Search);
            }
            (KeyCode::Char('?'), false) => {
                self.search_buffer.clear();
                self.search_direction = SearchDirection::Backward;
                self.set_mode(Mode::Search);
            }
            (KeyCode::Char('R'), false) => self.enter_replace(false),
            (KeyCode::Char('r'), true) => self.enter_replace(true),

            // Repeat last search
            (KeyCode::Char('n'), false) => self.repeat_search(self.search_direction),
            (KeyCode::Char('N'), false) => self.repeat_search(match self.search_direction {
                SearchDirection::Forward => SearchDirection::Backward,
                SearchDirection::Backward => SearchDirection::Forward,
            }),

            // Single-shot edits
            (KeyCode::Char('x'), false) | (KeyCode::Delete, false) => {
                self.current_doc_mut().delete_char()
            }
            (KeyCode::Char('X'), false) => self.current_doc_mut().backspace(),
            (KeyCode::Char('D'), false) => self.current_doc_mut().delete_to_line_end(),
            (KeyCode::Char('J'), false) => self.current_doc_mut().join_with_next(),
            (KeyCode::Char('>'), false) => self.current_doc_mut().indent_line(tab_size),
            (KeyCode::Char('<'), false) => self.current_doc_mut().unindent_line(tab_size),
            (KeyCode::Char('p'), false) => self.paste(),
            (KeyCode::Char('d'), true) => self.current_doc_mut().duplicate_line(),
            (KeyCode::Char('t'), true) => self.current_doc_mut().transpose_chars(),
            (KeyCode::Up, true) => self.current_doc_mut().move_line_up(),
            (KeyCode::Down, true) => self.current_doc_mut().move_line_down(),

            // Reserved mode slot
            (KeyCode::Char('v'), false) => self.set_mode(Mode::Visual),

            (KeyCode::Esc, _) => {}
            _ => {}
        }

        Ok(())
    }

    /// Second key of a `d`/`y`/`g`/`z` sequence. Unrecognized pairs are
    /// discarded without effect.
    fn handle_pending(&mut self, first: char, key: KeyEvent) {
        let height = self.viewport_height();
        match (first, key.code) {
            ('d', KeyCode::Char('d')) => {
                let doc = self.current_doc();
                let y = doc.cursor_y;
                let text = doc.current_line().as_str().to_string();
                // Deleted lines land in the clipboard, like yanked ones
                self.clipboard.yank(vec![text], y, y);
                self.current_doc_mut().delete_current_line();
            }
            ('y', KeyCode::Char('y')) => {
                let doc = self.current_doc();
                let y = doc.cursor_y;
                let text = doc.current_line().as_str().to_string();
                self.clipboard.yank(vec![text], y, y);
                self.set_status("1 line yanked");
            }
            ('g', KeyCode::Char('g')) => self.current_doc_mut().move_document_start(),
            ('g', KeyCode::Char('U')) => self.current_doc_mut().uppercase_word(),
            ('g', KeyCode::Char('u')) => self.current_doc_mut().lowercase_word(),
            ('z', KeyCode::Char('z')) => self.current_doc_mut().center_view(height),
            _ => {}
        }
    }

    /// Paste the clipboard lines below the cursor line.
    fn paste(&mut self) {
        if self.clipboard.is_empty() {
            self.set_status("Clipboard is empty");
            return;
        }
        let lines = self.clipboard.lines().to_vec();
        self.current_doc_mut().insert_lines_below(&lines);
    }

    /// Enter Replace mode; requires a previous search pattern.
    fn enter_replace(&mut self, all: bool) {
        if self.last_search.is_empty() {
            self.set_status("No previous search pattern");
            return;
        }
        self.replace_buffer.clear();
        self.replace_all = all;
        self.set_mode(Mode::Replace);
    }

    /// Re-run the sticky search pattern in the given direction.
    fn repeat_search(&mut self, direction: SearchDirection) {
        if self.last_search.is_empty() {
            self.set_status("No previous search pattern");
            return;
        }
        let pattern = self.last_search.clone();
        self.run_search(&pattern, direction);
    }
}
