//! Prompt modes: the command, search, and replace input lines.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use termod_core::{ExCommand, Mode};
use termod_search::{self as search, SearchDirection};

use crate::session::Session;

impl Session {
    pub(crate) fn handle_command_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.set_mode(Mode::Normal),
            KeyCode::Char(ch) => self.command_buffer.push(ch),
            KeyCode::Backspace => {
                // Backspacing past the start of an empty line dismisses
                // the prompt.
                if self.command_buffer.pop().is_none() {
                    self.set_mode(Mode::Normal);
                }
            }
            KeyCode::Enter => {
                let command = ExCommand::parse(&self.command_buffer);
                self.command_buffer.clear();
                self.set_mode(Mode::Normal);
                self.execute_command(command)?;
            }
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.set_mode(Mode::Normal),
            KeyCode::Char(ch) => self.search_buffer.push(ch),
            KeyCode::Backspace => {
                if self.search_buffer.pop().is_none() {
                    self.set_mode(Mode::Normal);
                }
            }
            KeyCode::Enter => {
                let pattern = std::mem::take(&mut self.search_buffer);
                let direction = self.search_direction;
                self.set_mode(Mode::Normal);
                self.run_search(&pattern, direction);
            }
            _ => {}
        }
    }

    pub(crate) fn handle_replace_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.set_mode(Mode::Normal),
            KeyCode::Char(ch) => self.replace_buffer.push(ch),
            KeyCode::Backspace => {
                if self.replace_buffer.pop().is_none() {
                    self.set_mode(Mode::Normal);
                }
            }
            KeyCode::Enter => {
                let replacement = std::mem::take(&mut self.replace_buffer);
                self.set_mode(Mode::Normal);
                self.run_replace(&replacement);
            }
            _ => {}
        }
    }

    /// Execute a search and move the cursor to the hit, recentering the
    /// view. Successful patterns become the sticky last search.
    pub(crate) fn run_search(&mut self, pattern: &str, direction: SearchDirection) {
        if pattern.is_empty() {
            return;
        }

        let hit = match direction {
            SearchDirection::Forward => search::find_forward(self.current_doc(), pattern),
            SearchDirection::Backward => search::find_backward(self.current_doc(), pattern),
        };

        match hit {
            Some(hit) => {
                self.last_search = pattern.to_string();
                let (width, height) = (self.viewport_width(), self.viewport_height());
                let doc = self.current_doc_mut();
                doc.cursor_y = hit.line;
                doc.goto_column(hit.col, width);
                doc.center_view(height);
            }
            None => self.set_status(format!("Pattern not found: {}", pattern)),
        }
    }

    /// Apply the replacement typed in Replace mode against the sticky
    /// search pattern, either once at the cursor or across the document.
    fn run_replace(&mut self, replacement: &str) {
        let pattern = self.last_search.clone();
        if pattern.is_empty() {
            self.set_status("No previous search pattern");
            return;
        }

        if self.replace_all {
            let count = search::replace_all(self.current_doc_mut(), &pattern, replacement);
            if count == 0 {
                self.set_status(format!("Pattern not found: {}", pattern));
            } else {
                self.set_status(format!(
                    "Replaced {} occurrence{}",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
        } else if !search::replace_next(self.current_doc_mut(), &pattern, replacement) {
            self.set_status(format!("Pattern not found: {}", pattern));
        }
    }
}
