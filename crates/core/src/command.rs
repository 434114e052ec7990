//! Ex-command grammar.
//!
//! Parses the string accumulated in command mode (after `:`) into a
//! typed command. Parsing never fails: unrecognized input becomes
//! [`ExCommand::Unknown`] and surfaces as a status message.

use std::path::PathBuf;

/// A parsed ex command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// `:w` — save the active buffer
    Write,
    /// `:w <path>` — save as
    WriteAs(PathBuf),
    /// `:q` / `:q!` — quit, optionally discarding changes
    Quit { force: bool },
    /// `:wq` / `:x` — save then quit
    WriteQuit,
    /// `:e <path>` / `:edit <path>` — open a file
    Edit(PathBuf),
    /// `:n` / `:new` — new empty buffer
    New,
    /// `:bn` / `:bnext` — next buffer
    BufferNext,
    /// `:bp` / `:bprev` — previous buffer
    BufferPrev,
    /// `:bd` / `:bdelete`, with `!` to discard changes
    BufferDelete { force: bool },
    /// `:set nu` / `:set nonu`
    LineNumbers(bool),
    /// `:set ai` / `:set noai`
    AutoIndent(bool),
    /// `:syntax on` / `:syntax off`
    Syntax(bool),
    /// `:help` / `:h`
    Help,
    /// `:<number>` — go to line (1-based)
    GotoLine(usize),
    /// Anything else; carries the raw input for the status message
    Unknown(String),
}

impl ExCommand {
    /// Parse a command line (without the leading `:`).
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let head = parts.next().unwrap_or("");
        let arg = parts.next();

        match (head, arg) {
            ("w" | "write", None) => Self::Write,
            ("w" | "write", Some(path)) => Self::WriteAs(PathBuf::from(path)),
            ("q" | "quit", None) => Self::Quit { force: false },
            ("q!" | "quit!", None) => Self::Quit { force: true },
            ("wq" | "x", None) => Self::WriteQuit,
            ("e" | "edit", Some(path)) => Self::Edit(PathBuf::from(path)),
            ("n" | "new", None) => Self::New,
            ("bn" | "bnext", None) => Self::BufferNext,
            ("bp" | "bprev", None) => Self::BufferPrev,
            ("bd" | "bdelete", None) => Self::BufferDelete { force: false },
            ("bd!" | "bdelete!", None) => Self::BufferDelete { force: true },
            ("set", Some("nu")) => Self::LineNumbers(true),
            ("set", Some("nonu")) => Self::LineNumbers(false),
            ("set", Some("ai")) => Self::AutoIndent(true),
            ("set", Some("noai")) => Self::AutoIndent(false),
            ("syntax", Some("on")) => Self::Syntax(true),
            ("syntax", Some("off")) => Self::Syntax(false),
            ("help" | "h", None) => Self::Help,
            _ => {
                if let Ok(n) = input.parse::<usize>() {
                    Self::GotoLine(n)
                } else {
                    Self::Unknown(input.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_and_write_as() {
        assert_eq!(ExCommand::parse("w"), ExCommand::Write);
        assert_eq!(
            ExCommand::parse("w notes.txt"),
            ExCommand::WriteAs(PathBuf::from("notes.txt"))
        );
    }

    #[test]
    fn test_parse_quit_variants() {
        assert_eq!(ExCommand::parse("q"), ExCommand::Quit { force: false });
        assert_eq!(ExCommand::parse("q!"), ExCommand::Quit { force: true });
        assert_eq!(ExCommand::parse("wq"), ExCommand::WriteQuit);
        assert_eq!(ExCommand::parse("x"), ExCommand::WriteQuit);
    }

    #[test]
    fn test_parse_buffer_commands() {
        assert_eq!(ExCommand::parse("bn"), ExCommand::BufferNext);
        assert_eq!(ExCommand::parse("bnext"), ExCommand::BufferNext);
        assert_eq!(ExCommand::parse("bp"), ExCommand::BufferPrev);
        assert_eq!(
            ExCommand::parse("bd"),
            ExCommand::BufferDelete { force: false }
        );
        assert_eq!(
            ExCommand::parse("bd!"),
            ExCommand::BufferDelete { force: true }
        );
    }

    #[test]
    fn test_parse_set_options() {
        assert_eq!(ExCommand::parse("set nu"), ExCommand::LineNumbers(true));
        assert_eq!(ExCommand::parse("set nonu"), ExCommand::LineNumbers(false));
        assert_eq!(ExCommand::parse("set ai"), ExCommand::AutoIndent(true));
        assert_eq!(ExCommand::parse("set noai"), ExCommand::AutoIndent(false));
        assert_eq!(ExCommand::parse("syntax on"), ExCommand::Syntax(true));
        assert_eq!(ExCommand::parse("syntax off"), ExCommand::Syntax(false));
    }

    #[test]
    fn test_parse_goto_line() {
        assert_eq!(ExCommand::parse("42"), ExCommand::GotoLine(42));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            ExCommand::parse("frobnicate"),
            ExCommand::Unknown("frobnicate".to_string())
        );
        assert_eq!(
            ExCommand::parse("set wrap"),
            ExCommand::Unknown("set wrap".to_string())
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(ExCommand::parse("  wq  "), ExCommand::WriteQuit);
    }
}
