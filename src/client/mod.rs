//! Interactive client
//!
//! Parses free-form interactive input, keeps the control connection, and
//! implements the remote operations plus purely local commands.

pub mod commands;
pub mod operations;
pub mod repl;
pub mod session;

pub use commands::{ClientCommand, parse_input};
pub use session::ClientSession;
