//! Document: one open file's lines plus cursor and scroll state.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::file_io;
use crate::line::Line;

/// One open file: an ordered sequence of lines, a cursor position,
/// a scroll offset, and a modified flag.
///
/// Invariants, clamped defensively after every processed key event:
/// - `line_count() >= 1` — a document is never line-empty
/// - `cursor_y < line_count()`
/// - `cursor_x <= current_line().len()`
#[derive(Debug)]
pub struct Document {
    lines: Vec<Line>,
    /// 0-based column (character offset into the current line)
    pub cursor_x: usize,
    /// 0-based line index
    pub cursor_y: usize,
    /// First visible column
    pub scroll_x: usize,
    /// First visible line
    pub scroll_y: usize,
    filename: Option<PathBuf>,
    modified: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty unnamed document with a single blank line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            cursor_x: 0,
            cursor_y: 0,
            scroll_x: 0,
            scroll_y: 0,
            filename: None,
            modified: false,
        }
    }

    /// Open a file. A missing file yields a fresh one-line document bound
    /// to that path (new-file semantics); only real I/O failures error.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut doc = Self::new();
        doc.filename = Some(path.clone());

        match file_io::read_text_file(&path)? {
            Some(lines) => {
                doc.lines = lines.into_iter().map(Line::from_text).collect();
                if doc.lines.is_empty() {
                    doc.lines.push(Line::new());
                }
                log::info!("Opened file: {}", path.display());
            }
            None => {
                log::info!("New file: {}", path.display());
            }
        }

        Ok(doc)
    }

    /// Save to the bound path. Errors if the document has no filename.
    /// On failure the modified flag is left untouched.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .filename
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No file name"))?;
        self.save_to(&path)
    }

    /// Save to a specific path and rebind the document to it.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.save_to(&path)?;
        self.filename = Some(path);
        Ok(())
    }

    fn save_to(&mut self, path: &Path) -> Result<()> {
        let lines: Vec<&str> = self.lines.iter().map(|l| l.as_str()).collect();
        file_io::write_text_file(path, &lines)?;
        self.modified = false;
        log::info!("Saved {} lines to {}", lines.len(), path.display());
        Ok(())
    }

    /// Bound file path, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Display title: file name or "[No Name]".
    pub fn title(&self) -> String {
        self.filename
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    /// True when the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark the document as changed.
    pub fn set_modified(&mut self) {
        self.modified = true;
    }

    /// Number of lines; always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at the given index.
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Mutable line at the given index.
    pub fn line_mut(&mut self, idx: usize) -> Option<&mut Line> {
        self.lines.get_mut(idx)
    }

    /// The line under the cursor.
    pub fn current_line(&self) -> &Line {
        &self.lines[self.cursor_y.min(self.lines.len() - 1)]
    }

    /// Mutable access to the line under the cursor.
    pub fn current_line_mut(&mut self) -> &mut Line {
        let idx = self.cursor_y.min(self.lines.len() - 1);
        &mut self.lines[idx]
    }

    /// Insert a line at the given index (clamped to the line count).
    pub fn insert_line(&mut self, at: usize, line: Line) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, line);
        self.modified = true;
    }

    /// Delete the line at the given index.
    ///
    /// On a single-line document this degrades to clearing the line's
    /// content, preserving the line-count floor.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            return;
        }
        if self.lines.len() == 1 {
            self.lines[0].set_content("");
            self.cursor_x = 0;
        } else {
            self.lines.remove(at);
            if self.cursor_y >= self.lines.len() {
                self.cursor_y = self.lines.len() - 1;
            }
            self.cursor_x = self.cursor_x.min(self.current_line().len());
        }
        self.modified = true;
    }

    /// Split the current line at the cursor.
    ///
    /// The tail moves to a new line inserted below; the cursor lands at
    /// the start of the new line.
    pub fn split_at_cursor(&mut self) {
        let x = self.cursor_x;
        let tail = self.current_line_mut().split_off(x);
        self.lines.insert(self.cursor_y + 1, Line::from_text(tail));
        self.cursor_y += 1;
        self.cursor_x = 0;
        self.modified = true;
    }

    /// Join the current line with the next one.
    ///
    /// The cursor lands at the former join point (the old length of the
    /// current line). No-op on the last line.
    pub fn join_with_next(&mut self) {
        if self.cursor_y + 1 >= self.lines.len() {
            return;
        }
        let next = self.lines.remove(self.cursor_y + 1);
        let join_point = self.lines[self.cursor_y].len();
        self.lines[self.cursor_y].push_str(next.as_str());
        self.cursor_x = join_point;
        self.modified = true;
    }

    /// Clamp cursor coordinates back into bounds.
    ///
    /// Safety net run after every processed key event; individual
    /// operations are expected to maintain the invariants themselves.
    pub fn clamp_cursor(&mut self) {
        if self.cursor_y >= self.lines.len() {
            self.cursor_y = self.lines.len() - 1;
        }
        let len = self.current_line().len();
        if self.cursor_x > len {
            self.cursor_x = len;
        }
    }
}
