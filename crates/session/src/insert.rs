//! Insert-mode key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termod_core::Mode;

use crate::session::Session;

impl Session {
    pub(crate) fn handle_insert_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        let height = self.viewport_height();
        let tab_size = self.options.tab_size;
        let auto_indent = self.options.auto_indent;

        match key.code {
            // Leaving insert mode steps one left so the cursor sits on
            // the last inserted character.
            KeyCode::Esc => {
                let doc = self.current_doc_mut();
                if doc.cursor_x > 0 {
                    doc.cursor_x -= 1;
                }
                self.set_mode(Mode::Normal);
            }

            KeyCode::Char(ch) => self.current_doc_mut().insert_char(ch),
            KeyCode::Enter => self.current_doc_mut().insert_newline(auto_indent, tab_size),
            KeyCode::Backspace => self.current_doc_mut().backspace(),
            KeyCode::Delete => self.current_doc_mut().delete_char(),
            KeyCode::Tab => self.current_doc_mut().insert_tab(tab_size),

            // Navigation stays available while inserting
            KeyCode::Left => self.current_doc_mut().move_left(),
            KeyCode::Right => self.current_doc_mut().move_right(),
            KeyCode::Up => self.current_doc_mut().move_up(),
            KeyCode::Down => self.current_doc_mut().move_down(),
            KeyCode::Home => self.current_doc_mut().move_line_start(),
            KeyCode::End => self.current_doc_mut().move_line_end(),
            KeyCode::PageUp => self.current_doc_mut().page_up(height),
            KeyCode::PageDown => self.current_doc_mut().page_down(height),

            _ => {}
        }
    }

    /// Visual mode is a reserved slot: it only supports leaving again.
    pub(crate) fn handle_visual_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('v')) {
            self.set_mode(Mode::Normal);
        }
    }
}
