//! Modal input state machine for termod.
//!
//! The [`Session`] owns the open [`Document`]s, the shared registers
//! (clipboard, last search), the current [`Mode`], and the per-mode
//! transient input lines. One key event at a time goes in through
//! [`Session::handle_key`]; the frontend then repaints from the
//! session's exposed state.
//!
//! [`Document`]: termod_buffer::Document
//! [`Mode`]: termod_core::Mode

mod clipboard;
mod ex;
mod insert;
mod normal;
mod prompt;
mod session;

pub use clipboard::Clipboard;
pub use session::Session;
