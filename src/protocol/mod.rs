//! MFTP wire protocol
//!
//! Command parsing, response encoding/parsing, and line limits shared by the
//! client and the server.

pub mod command;
pub mod response;

pub use command::{Command, parse_command};
pub use response::{Response, parse_port};

/// Hard cap on a control-channel line, in bytes. Longer lines are truncated
/// and fed to the parser as received.
pub const MAX_LINE_LEN: usize = 1024;
