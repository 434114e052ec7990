//! Core types for termod.
//!
//! Shared vocabulary between the session state machine and the frontend:
//! editor modes, the terminal event pump, and the ex-command grammar.

pub mod command;
pub mod event;
pub mod mode;

pub use command::ExCommand;
pub use event::{Event, EventHandler};
pub use mode::Mode;
