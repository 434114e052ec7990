//! Configuration structures for termod settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Tab size (number of spaces)
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Copy previous line's indentation on newline
    #[serde(default = "default_auto_indent")]
    pub auto_indent: bool,

    /// Show line numbers in the gutter
    #[serde(default = "default_line_numbers")]
    pub line_numbers: bool,

    /// Enable syntax highlighting
    #[serde(default = "default_syntax_highlighting")]
    pub syntax_highlighting: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: defaults::TAB_SIZE,
            auto_indent: defaults::AUTO_INDENT,
            line_numbers: defaults::LINE_NUMBERS,
            syntax_highlighting: defaults::SYNTAX_HIGHLIGHTING,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional, defaults to the XDG cache directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: defaults::MIN_LOG_LEVEL.to_string(),
        }
    }
}

// Default value functions for serde
fn default_tab_size() -> usize {
    defaults::TAB_SIZE
}

fn default_auto_indent() -> bool {
    defaults::AUTO_INDENT
}

fn default_line_numbers() -> bool {
    defaults::LINE_NUMBERS
}

fn default_syntax_highlighting() -> bool {
    defaults::SYNTAX_HIGHLIGHTING
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}
