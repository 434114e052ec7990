//! Text search and replace for termod.
//!
//! Plain-substring search over a [`Document`] with wraparound, plus
//! single and all-occurrence replace. Patterns are matched literally;
//! internally they are escaped and run through the regex engine so all
//! offsets come back as byte positions we convert to character columns.

use regex::{NoExpand, Regex};
use termod_buffer::Document;

/// Search direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// A match location: line index and character column of the match start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub line: usize,
    pub col: usize,
}

/// Compile a literal pattern. Empty patterns match nothing.
fn literal_regex(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    Regex::new(&regex::escape(pattern)).ok()
}

/// Character columns of every match start in a line, left to right.
fn match_cols(regex: &Regex, line: &str) -> Vec<usize> {
    regex
        .find_iter(line)
        .map(|m| line[..m.start()].chars().count())
        .collect()
}

/// First match in `line` at or after `from` (character column).
fn first_match_from(regex: &Regex, line: &str, from: usize) -> Option<usize> {
    match_cols(regex, line).into_iter().find(|&col| col >= from)
}

/// Last match in `line` strictly before `before`.
fn last_match_before(regex: &Regex, line: &str, before: usize) -> Option<usize> {
    match_cols(regex, line)
        .into_iter()
        .rev()
        .find(|&col| col < before)
}

/// Search forward from one past the cursor, wrapping at the document end.
///
/// Scans the rest of the current line, then subsequent lines, then wraps
/// from the top back to (and excluding) the starting position. Totality:
/// if the pattern occurs anywhere, some call finds it within one pass
/// over the document's lines.
pub fn find_forward(doc: &Document, pattern: &str) -> Option<SearchHit> {
    let regex = literal_regex(pattern)?;
    let cy = doc.cursor_y;
    let start_col = doc.cursor_x + 1;

    // Rest of the current line
    if let Some(line) = doc.line(cy) {
        if let Some(col) = first_match_from(&regex, line.as_str(), start_col) {
            return Some(SearchHit { line: cy, col });
        }
    }

    // Lines below
    for y in cy + 1..doc.line_count() {
        if let Some(col) = match_cols(&regex, doc.line(y)?.as_str()).first().copied() {
            return Some(SearchHit { line: y, col });
        }
    }

    // Wrap: lines above, then the current line up to the start position
    for y in 0..cy {
        if let Some(col) = match_cols(&regex, doc.line(y)?.as_str()).first().copied() {
            return Some(SearchHit { line: y, col });
        }
    }
    if let Some(line) = doc.line(cy) {
        // Leftmost qualifying match: the wrap continues scan order from
        // the line start, it does not pick the nearest match backward.
        if let Some(col) = match_cols(&regex, line.as_str())
            .into_iter()
            .find(|&col| col < start_col)
        {
            return Some(SearchHit { line: cy, col });
        }
    }

    None
}

/// Search backward from one before the cursor, wrapping at the document
/// start. Mirror image of [`find_forward`].
pub fn find_backward(doc: &Document, pattern: &str) -> Option<SearchHit> {
    let regex = literal_regex(pattern)?;
    let cy = doc.cursor_y;

    // Start of the current line, rightmost match first
    if let Some(line) = doc.line(cy) {
        if let Some(col) = last_match_before(&regex, line.as_str(), doc.cursor_x) {
            return Some(SearchHit { line: cy, col });
        }
    }

    // Lines above, bottom-up
    for y in (0..cy).rev() {
        if let Some(col) = match_cols(&regex, doc.line(y)?.as_str()).last().copied() {
            return Some(SearchHit { line: y, col });
        }
    }

    // Wrap: lines below from the document end, then the current line
    // from its end down to the cursor
    for y in (cy + 1..doc.line_count()).rev() {
        if let Some(col) = match_cols(&regex, doc.line(y)?.as_str()).last().copied() {
            return Some(SearchHit { line: y, col });
        }
    }
    if let Some(line) = doc.line(cy) {
        if let Some(col) = match_cols(&regex, line.as_str())
            .into_iter()
            .rev()
            .find(|&col| col >= doc.cursor_x)
        {
            return Some(SearchHit { line: cy, col });
        }
    }

    None
}

/// Replace the next occurrence of `find` on or after the cursor.
///
/// Splices the replacement in place and leaves the cursor just past the
/// inserted text. Returns `false` when there is no match at or after the
/// cursor (no wraparound for replace).
pub fn replace_next(doc: &mut Document, find: &str, replace: &str) -> bool {
    let Some(regex) = literal_regex(find) else {
        return false;
    };
    let find_len = find.chars().count();

    let mut hit = None;
    for y in doc.cursor_y..doc.line_count() {
        let from = if y == doc.cursor_y { doc.cursor_x } else { 0 };
        if let Some(line) = doc.line(y) {
            if let Some(col) = first_match_from(&regex, line.as_str(), from) {
                hit = Some((y, col));
                break;
            }
        }
    }

    let Some((y, col)) = hit else {
        return false;
    };

    if let Some(line) = doc.line_mut(y) {
        line.replace_range(col, col + find_len, replace);
    }
    doc.cursor_y = y;
    doc.cursor_x = col + replace.chars().count();
    doc.set_modified();
    true
}

/// Replace every occurrence in the document, top to bottom and left to
/// right, non-overlapping. Returns the total replacement count.
pub fn replace_all(doc: &mut Document, find: &str, replace: &str) -> usize {
    let Some(regex) = literal_regex(find) else {
        return 0;
    };

    let mut count = 0;
    for y in 0..doc.line_count() {
        let Some(line) = doc.line(y) else { continue };
        let matched = regex.find_iter(line.as_str()).count();
        if matched == 0 {
            continue;
        }
        let replaced = regex
            .replace_all(line.as_str(), NoExpand(replace))
            .into_owned();
        if let Some(line) = doc.line_mut(y) {
            line.set_content(replaced);
        }
        count += matched;
    }

    if count > 0 {
        doc.set_modified();
        doc.clamp_cursor();
    }
    count
}
