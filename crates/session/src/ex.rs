//! Ex-command execution.
//!
//! Backends for the parsed command-line grammar. Every failure here is a
//! status message; nothing in this layer terminates the process or
//! returns a user error as `Err`.

use anyhow::Result;

use termod_core::ExCommand;

use crate::session::Session;

impl Session {
    pub(crate) fn execute_command(&mut self, command: ExCommand) -> Result<()> {
        match command {
            ExCommand::Write => self.save_current(),
            ExCommand::WriteAs(path) => {
                match self.current_doc_mut().save_as(&path) {
                    Ok(()) => self.set_status(format!("Written {}", path.display())),
                    Err(e) => {
                        log::error!("Save failed: {}", e);
                        self.set_status(format!("Save failed: {}", e));
                    }
                }
            }
            ExCommand::Quit { force } => {
                if !force && self.any_modified() {
                    self.set_status("Unsaved changes (use :q! to discard)");
                } else {
                    self.request_quit();
                }
            }
            ExCommand::WriteQuit => {
                if self.save_current_ok() {
                    self.request_quit();
                }
            }
            ExCommand::Edit(path) => {
                if let Err(e) = self.open_file(&path) {
                    log::error!("Open failed: {}", e);
                    self.set_status(format!("Open failed: {}", e));
                }
            }
            ExCommand::New => self.new_buffer(),
            ExCommand::BufferNext => {
                self.next_buffer();
                self.set_status(format!(
                    "Buffer {}/{}: {}",
                    self.current_index() + 1,
                    self.buffer_count(),
                    self.current_doc().title()
                ));
            }
            ExCommand::BufferPrev => {
                self.prev_buffer();
                self.set_status(format!(
                    "Buffer {}/{}: {}",
                    self.current_index() + 1,
                    self.buffer_count(),
                    self.current_doc().title()
                ));
            }
            ExCommand::BufferDelete { force } => self.delete_buffer(force),
            ExCommand::LineNumbers(on) => {
                self.options.line_numbers = on;
                self.set_status(if on { "Line numbers on" } else { "Line numbers off" });
            }
            ExCommand::AutoIndent(on) => {
                self.options.auto_indent = on;
                self.set_status(if on { "Auto-indent on" } else { "Auto-indent off" });
            }
            ExCommand::Syntax(on) => {
                self.options.syntax_highlighting = on;
                self.set_status(if on { "Syntax on" } else { "Syntax off" });
            }
            ExCommand::Help => {
                self.set_status(
                    "hjkl move | i insert | :w save | :q quit | / search | :help for this line",
                );
            }
            ExCommand::GotoLine(n) => {
                let line_count = self.current_doc().line_count();
                if n == 0 || n > line_count {
                    self.set_status(format!("Line {} out of range (1-{})", n, line_count));
                } else {
                    let height = self.viewport_height();
                    self.current_doc_mut().goto_line(n, height);
                }
            }
            ExCommand::Unknown(input) => {
                self.set_status(format!("Unknown command: {}", input));
            }
        }
        Ok(())
    }

    fn save_current(&mut self) {
        if self.save_current_ok() {
            let doc = self.current_doc();
            self.set_status(format!(
                "Written {} ({} lines)",
                doc.title(),
                doc.line_count()
            ));
        }
    }

    /// Save the active buffer; on failure surface the error and report
    /// `false`. The modified flag stays set when the write did not land.
    fn save_current_ok(&mut self) -> bool {
        match self.current_doc_mut().save() {
            Ok(()) => true,
            Err(e) => {
                log::error!("Save failed: {}", e);
                self.set_status(format!("Save failed: {}", e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termod_config::EditorSettings;

    fn session() -> Session {
        Session::new(EditorSettings::default())
    }

    #[test]
    fn test_write_without_filename_reports_status() {
        let mut s = session();
        s.execute_command(ExCommand::Write).unwrap();
        assert!(s.status_message().unwrap().contains("Save failed"));
    }

    #[test]
    fn test_write_quit_blocked_by_failed_save() {
        let mut s = session();
        s.current_doc_mut().insert_char('x');
        s.execute_command(ExCommand::WriteQuit).unwrap();
        assert!(!s.should_quit());
        assert!(s.current_doc().is_modified());
    }

    #[test]
    fn test_goto_out_of_range_leaves_state() {
        let mut s = session();
        s.execute_command(ExCommand::GotoLine(99)).unwrap();
        assert_eq!(s.current_doc().cursor_y, 0);
        assert!(s.status_message().unwrap().contains("out of range"));
    }

    #[test]
    fn test_save_as_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.txt");

        let mut s = session();
        s.current_doc_mut().insert_char('z');
        s.execute_command(ExCommand::WriteAs(path.clone())).unwrap();

        assert!(!s.current_doc().is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "z\n");
    }
}
