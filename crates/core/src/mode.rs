//! Editor modes.

/// The current interpretation context for key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and single-shot edit commands
    #[default]
    Normal,
    /// Text entry
    Insert,
    /// Ex command line (`:`)
    Command,
    /// Search prompt (`/` or `?`)
    Search,
    /// Replace prompt
    Replace,
    /// Reserved mode slot; enter and exit only
    Visual,
}

impl Mode {
    /// Status line label for the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Search => "SEARCH",
            Mode::Replace => "REPLACE",
            Mode::Visual => "VISUAL",
        }
    }
}
