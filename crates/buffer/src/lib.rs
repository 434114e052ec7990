//! Document and line model for termod.
//!
//! Provides the in-memory text storage (an owned vector of [`Line`]s per
//! [`Document`]), cursor and scroll state, navigation algorithms, and
//! in-place edit operations. File load/save lives in [`file_io`].

mod document;
mod edit;
mod file_io;
mod line;
mod navigate;

pub use document::Document;
pub use file_io::{read_text_file, write_text_file};
pub use line::Line;
pub use navigate::{char_class, CharClass};

/// Fixed right margin kept visible when scrolling horizontally.
pub const SCROLL_RIGHT_MARGIN: usize = 10;
