//! File I/O collaborator: whole-file read and write.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a text file as a vector of lines with terminators stripped.
///
/// Returns `Ok(None)` when the file does not exist — opening a missing
/// path is new-file semantics, not an error. Any other I/O failure is
/// propagated.
pub fn read_text_file(path: &Path) -> Result<Option<Vec<String>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let lines = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect::<Vec<_>>();

    // A trailing newline produces one empty trailing entry; drop it so
    // "a\nb\n" loads as two lines, not three.
    let lines = match lines.last() {
        Some(last) if last.is_empty() && lines.len() > 1 => lines[..lines.len() - 1].to_vec(),
        _ => lines,
    };

    Ok(Some(lines))
}

/// Write lines to a text file, one terminator per line.
pub fn write_text_file(path: &Path, lines: &[&str]) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for line in lines {
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}
