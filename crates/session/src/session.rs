//! The session: open buffers, registers, and top-level key dispatch.

use anyhow::Result;
use crossterm::event::KeyEvent;
use std::path::Path;

use termod_buffer::Document;
use termod_config::EditorSettings;
use termod_core::Mode;
use termod_search::SearchDirection;

use crate::clipboard::Clipboard;

/// The editing session: an ordered collection of open documents, the
/// active-buffer selector, the current mode, and the shared registers.
///
/// Invariant: there is always at least one buffer, and `current` is a
/// valid index into the buffer list.
pub struct Session {
    buffers: Vec<Document>,
    current: usize,
    mode: Mode,
    /// Ex command line being typed (Command mode)
    pub(crate) command_buffer: String,
    /// Search pattern being typed (Search mode)
    pub(crate) search_buffer: String,
    /// Replacement text being typed (Replace mode)
    pub(crate) replace_buffer: String,
    /// Replace mode applies to all occurrences instead of the next one
    pub(crate) replace_all: bool,
    /// Sticky pattern reused by `n`/`N` and Replace mode
    pub(crate) last_search: String,
    pub(crate) search_direction: SearchDirection,
    /// First key of a two-key Normal-mode sequence (`dd`, `yy`, `gg`, ...)
    pub(crate) pending: Option<char>,
    pub(crate) clipboard: Clipboard,
    pub(crate) options: EditorSettings,
    status: Option<String>,
    quit: bool,
    /// Text-area viewport in cells
    width: usize,
    height: usize,
}

impl Session {
    /// Create a session with one empty buffer.
    pub fn new(options: EditorSettings) -> Self {
        Self {
            buffers: vec![Document::new()],
            current: 0,
            mode: Mode::Normal,
            command_buffer: String::new(),
            search_buffer: String::new(),
            replace_buffer: String::new(),
            replace_all: false,
            last_search: String::new(),
            search_direction: SearchDirection::Forward,
            pending: None,
            clipboard: Clipboard::default(),
            options,
            status: None,
            quit: false,
            width: 80,
            height: 24,
        }
    }

    /// Create a session with one buffer opened from a file.
    pub fn with_file(options: EditorSettings, path: impl AsRef<Path>) -> Result<Self> {
        let mut session = Self::new(options);
        session.buffers[0] = Document::from_file(path.as_ref())?;
        Ok(session)
    }

    /// The active document.
    pub fn current_doc(&self) -> &Document {
        &self.buffers[self.current]
    }

    /// Mutable access to the active document.
    pub fn current_doc_mut(&mut self) -> &mut Document {
        &mut self.buffers[self.current]
    }

    /// Index of the active buffer.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of open buffers; always at least 1.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// True once a quit command has been accepted.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Update the text-area viewport size (on start and terminal resize).
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Viewport width in cells.
    pub fn viewport_width(&self) -> usize {
        self.width
    }

    /// Viewport height in rows.
    pub fn viewport_height(&self) -> usize {
        self.height
    }

    /// Current editor options (mutated by `:set` and `:syntax`).
    pub fn options(&self) -> &EditorSettings {
        &self.options
    }

    /// Transient status message, shown until the next key is processed.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The text typed so far in the active prompt (command, search, or
    /// replace line), for rendering; `None` outside prompt modes.
    pub fn prompt_line(&self) -> Option<String> {
        match self.mode {
            Mode::Command => Some(format!(":{}", self.command_buffer)),
            Mode::Search => {
                let sigil = match self.search_direction {
                    SearchDirection::Forward => '/',
                    SearchDirection::Backward => '?',
                };
                Some(format!("{}{}", sigil, self.search_buffer))
            }
            Mode::Replace => Some(format!("replace with: {}", self.replace_buffer)),
            _ => None,
        }
    }

    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Process one key event: route it through the current mode's handler,
    /// then clamp the cursor and scroll back into bounds.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status = None;

        match self.mode {
            Mode::Normal => self.handle_normal_key(key)?,
            Mode::Insert => self.handle_insert_key(key),
            Mode::Command => self.handle_command_key(key)?,
            Mode::Search => self.handle_search_key(key),
            Mode::Replace => self.handle_replace_key(key),
            Mode::Visual => self.handle_visual_key(key),
        }

        // Structural safety net: no operation may leave the cursor or the
        // scroll window out of bounds.
        let (width, height) = (self.width, self.height);
        let doc = self.current_doc_mut();
        doc.clamp_cursor();
        doc.scroll_to_cursor(width, height);

        Ok(())
    }

    // === Buffer management (ex-command backends) ===

    /// Open a path, reusing an already-open buffer for the same file.
    pub(crate) fn open_file(&mut self, path: &Path) -> Result<()> {
        if let Some(idx) = self
            .buffers
            .iter()
            .position(|b| b.filename() == Some(path))
        {
            self.current = idx;
            self.set_status(format!("Switched to {}", self.current_doc().title()));
            return Ok(());
        }

        let doc = Document::from_file(path)?;
        self.buffers.push(doc);
        self.current = self.buffers.len() - 1;
        Ok(())
    }

    /// Append a new empty buffer and switch to it.
    pub(crate) fn new_buffer(&mut self) {
        self.buffers.push(Document::new());
        self.current = self.buffers.len() - 1;
    }

    /// Cycle to the next buffer.
    pub(crate) fn next_buffer(&mut self) {
        self.current = (self.current + 1) % self.buffers.len();
    }

    /// Cycle to the previous buffer.
    pub(crate) fn prev_buffer(&mut self) {
        self.current = (self.current + self.buffers.len() - 1) % self.buffers.len();
    }

    /// Close the active buffer. Refused when it is the last one, or when
    /// it has unsaved changes and `force` is not set.
    pub(crate) fn delete_buffer(&mut self, force: bool) {
        if self.buffers.len() == 1 {
            self.set_status("Cannot close the last buffer");
            return;
        }
        if self.current_doc().is_modified() && !force {
            self.set_status("Buffer has unsaved changes (use :bd! to discard)");
            return;
        }
        log::info!("Closing buffer: {}", self.current_doc().title());
        self.buffers.remove(self.current);
        if self.current >= self.buffers.len() {
            self.current = self.buffers.len() - 1;
        }
    }

    /// True when any open buffer has unsaved changes.
    pub(crate) fn any_modified(&self) -> bool {
        self.buffers.iter().any(|b| b.is_modified())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn session() -> Session {
        Session::new(EditorSettings::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(s: &mut Session, code: KeyCode) {
        s.handle_key(key(code)).unwrap();
    }

    fn type_str(s: &mut Session, text: &str) {
        for ch in text.chars() {
            press(s, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_starts_in_normal_with_one_buffer() {
        let s = session();
        assert_eq!(s.mode(), Mode::Normal);
        assert_eq!(s.buffer_count(), 1);
        assert_eq!(s.current_doc().line_count(), 1);
    }

    #[test]
    fn test_insert_type_enter_escape_scenario() {
        // Type "hello", Enter, "world", Escape: two lines, cursor at
        // (1, 4) because Escape steps one left from (1, 5).
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        assert_eq!(s.mode(), Mode::Insert);
        type_str(&mut s, "hello");
        press(&mut s, KeyCode::Enter);
        type_str(&mut s, "world");
        press(&mut s, KeyCode::Esc);

        assert_eq!(s.mode(), Mode::Normal);
        let doc = s.current_doc();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line(0).unwrap().as_str(), "hello");
        assert_eq!(doc.line(1).unwrap().as_str(), "world");
        assert_eq!((doc.cursor_y, doc.cursor_x), (1, 4));
    }

    #[test]
    fn test_backspace_scenario() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "abc");
        for _ in 0..3 {
            press(&mut s, KeyCode::Backspace);
        }
        let doc = s.current_doc();
        assert_eq!(doc.current_line().as_str(), "");
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_yank_move_paste_scenario() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "x=1");
        press(&mut s, KeyCode::Enter);
        type_str(&mut s, "y=2");
        press(&mut s, KeyCode::Esc);

        // yy on line 1 ("y=2")? No: go to the first line first.
        type_str(&mut s, "gg");
        type_str(&mut s, "yy");
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Char('p'));

        let doc = s.current_doc();
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(1).unwrap().as_str(), "y=2");
        assert_eq!(doc.line(2).unwrap().as_str(), "x=1");
        assert_eq!(doc.cursor_y, 2);
    }

    #[test]
    fn test_paste_with_empty_clipboard_is_status_not_crash() {
        let mut s = session();
        press(&mut s, KeyCode::Char('p'));
        assert!(s.status_message().is_some());
        assert_eq!(s.current_doc().line_count(), 1);
    }

    #[test]
    fn test_dd_on_last_line_clears_it() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "solo");
        press(&mut s, KeyCode::Esc);
        type_str(&mut s, "dd");
        let doc = s.current_doc();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.current_line().as_str(), "");
    }

    #[test]
    fn test_command_mode_entry_and_unknown_command() {
        let mut s = session();
        press(&mut s, KeyCode::Char(':'));
        assert_eq!(s.mode(), Mode::Command);
        type_str(&mut s, "frob");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.mode(), Mode::Normal);
        assert!(s.status_message().unwrap().contains("frob"));
    }

    #[test]
    fn test_command_backspace_on_empty_returns_to_normal() {
        let mut s = session();
        press(&mut s, KeyCode::Char(':'));
        press(&mut s, KeyCode::Backspace);
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn test_goto_line_command() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "a");
        press(&mut s, KeyCode::Enter);
        type_str(&mut s, "b");
        press(&mut s, KeyCode::Enter);
        type_str(&mut s, "c");
        press(&mut s, KeyCode::Esc);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "2");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.current_doc().cursor_y, 1);
        assert_eq!(s.current_doc().cursor_x, 0);
    }

    #[test]
    fn test_search_finds_and_moves_cursor() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "foo bar");
        press(&mut s, KeyCode::Enter);
        type_str(&mut s, "baz foo");
        press(&mut s, KeyCode::Esc);
        type_str(&mut s, "gg");

        press(&mut s, KeyCode::Char('/'));
        assert_eq!(s.mode(), Mode::Search);
        type_str(&mut s, "foo");
        press(&mut s, KeyCode::Enter);

        assert_eq!(s.mode(), Mode::Normal);
        let doc = s.current_doc();
        assert_eq!((doc.cursor_y, doc.cursor_x), (1, 4));
    }

    #[test]
    fn test_search_not_found_is_status() {
        let mut s = session();
        press(&mut s, KeyCode::Char('/'));
        type_str(&mut s, "zzz");
        press(&mut s, KeyCode::Enter);
        assert!(s.status_message().unwrap().contains("zzz"));
        assert_eq!(s.current_doc().cursor_y, 0);
    }

    #[test]
    fn test_search_next_repeats_last_search() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "x a x a x");
        press(&mut s, KeyCode::Esc);
        type_str(&mut s, "0");

        press(&mut s, KeyCode::Char('/'));
        type_str(&mut s, "x");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.current_doc().cursor_x, 4);

        press(&mut s, KeyCode::Char('n'));
        assert_eq!(s.current_doc().cursor_x, 8);
        press(&mut s, KeyCode::Char('N'));
        assert_eq!(s.current_doc().cursor_x, 4);
    }

    #[test]
    fn test_buffer_cycle_commands() {
        let mut s = session();
        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "new");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.buffer_count(), 2);
        assert_eq!(s.current_index(), 1);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "bn");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.current_index(), 0);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "bp");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_bd_refuses_last_buffer() {
        let mut s = session();
        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "bd");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.buffer_count(), 1);
        assert!(s.status_message().is_some());
    }

    #[test]
    fn test_bd_refuses_modified_buffer() {
        let mut s = session();
        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "new");
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "dirty");
        press(&mut s, KeyCode::Esc);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "bd");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.buffer_count(), 2);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "bd!");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.buffer_count(), 1);
    }

    #[test]
    fn test_quit_refused_when_modified() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "x");
        press(&mut s, KeyCode::Esc);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "q");
        press(&mut s, KeyCode::Enter);
        assert!(!s.should_quit());
        assert!(s.status_message().is_some());

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "q!");
        press(&mut s, KeyCode::Enter);
        assert!(s.should_quit());
    }

    #[test]
    fn test_set_options_toggle() {
        let mut s = session();
        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "set nonu");
        press(&mut s, KeyCode::Enter);
        assert!(!s.options.line_numbers);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "set noai");
        press(&mut s, KeyCode::Enter);
        assert!(!s.options.auto_indent);

        press(&mut s, KeyCode::Char(':'));
        type_str(&mut s, "syntax off");
        press(&mut s, KeyCode::Enter);
        assert!(!s.options.syntax_highlighting);
    }

    #[test]
    fn test_visual_mode_enter_exit() {
        let mut s = session();
        press(&mut s, KeyCode::Char('v'));
        assert_eq!(s.mode(), Mode::Visual);
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn test_replace_next_flow() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "old old");
        press(&mut s, KeyCode::Esc);
        type_str(&mut s, "0");

        press(&mut s, KeyCode::Char('/'));
        type_str(&mut s, "old");
        press(&mut s, KeyCode::Enter);

        press(&mut s, KeyCode::Char('R'));
        assert_eq!(s.mode(), Mode::Replace);
        type_str(&mut s, "new");
        press(&mut s, KeyCode::Enter);

        assert_eq!(s.mode(), Mode::Normal);
        assert_eq!(s.current_doc().current_line().as_str(), "old new");
    }

    #[test]
    fn test_replace_all_flow() {
        let mut s = session();
        press(&mut s, KeyCode::Char('i'));
        type_str(&mut s, "a b a");
        press(&mut s, KeyCode::Enter);
        type_str(&mut s, "a");
        press(&mut s, KeyCode::Esc);

        press(&mut s, KeyCode::Char('/'));
        type_str(&mut s, "a");
        press(&mut s, KeyCode::Enter);

        s.handle_key(KeyEvent::new(
            KeyCode::Char('r'),
            KeyModifiers::CONTROL,
        ))
        .unwrap();
        assert_eq!(s.mode(), Mode::Replace);
        type_str(&mut s, "z");
        press(&mut s, KeyCode::Enter);

        let doc = s.current_doc();
        assert_eq!(doc.line(0).unwrap().as_str(), "z b z");
        assert_eq!(doc.line(1).unwrap().as_str(), "z");
        assert!(s.status_message().unwrap().contains('3'));
    }

    #[test]
    fn test_replace_without_search_is_refused() {
        let mut s = session();
        press(&mut s, KeyCode::Char('R'));
        assert_eq!(s.mode(), Mode::Normal);
        assert!(s.status_message().is_some());
    }

    #[test]
    fn test_cursor_bounds_hold_under_mixed_input() {
        let mut s = session();
        let keys = [
            KeyCode::Char('i'),
            KeyCode::Char('a'),
            KeyCode::Enter,
            KeyCode::Char('b'),
            KeyCode::Esc,
            KeyCode::Char('k'),
            KeyCode::Char('$'),
            KeyCode::Char('x'),
            KeyCode::Char('J'),
            KeyCode::Char('h'),
            KeyCode::Char('h'),
            KeyCode::Char('h'),
            KeyCode::Char('w'),
            KeyCode::Char('b'),
            KeyCode::Char('G'),
            KeyCode::Char('0'),
        ];
        for code in keys {
            press(&mut s, code);
            let doc = s.current_doc();
            assert!(doc.cursor_y < doc.line_count());
            assert!(doc.cursor_x <= doc.current_line().len());
        }
    }

    #[test]
    fn test_open_file_reuses_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "content\n").unwrap();

        let mut s = session();
        s.open_file(&path).unwrap();
        assert_eq!(s.buffer_count(), 2);

        s.new_buffer();
        assert_eq!(s.buffer_count(), 3);

        // Re-opening the same path switches instead of duplicating
        s.open_file(&path).unwrap();
        assert_eq!(s.buffer_count(), 3);
        assert_eq!(s.current_index(), 1);
    }
}
