//! Session clipboard register.

/// Single-slot, line-oriented clipboard.
///
/// Holds whole-line strings plus the line range they were yanked from.
/// A session field, never a process-wide static: the register belongs to
/// one editing session.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    lines: Vec<String>,
    /// Source line range `[start, end]`, 0-based inclusive
    source: Option<(usize, usize)>,
}

impl Clipboard {
    /// Replace the slot with a set of whole lines and their source range.
    pub fn yank(&mut self, lines: Vec<String>, start: usize, end: usize) {
        self.lines = lines;
        self.source = Some((start, end));
    }

    /// Yanked lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line range the contents were yanked from.
    pub fn source(&self) -> Option<(usize, usize)> {
        self.source
    }

    /// True when nothing has been yanked yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
