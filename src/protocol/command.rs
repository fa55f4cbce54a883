//! Module `command`
//!
//! Parses control-channel command lines into the `Command` enum. A command is
//! a single uppercase verb followed immediately by an optional argument;
//! leading spaces before the argument are skipped.

use crate::error::ProtocolError;

/// A control-channel command sent from client to server.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// `D` - request a fresh data channel; server answers `A<port>`.
    Data,
    /// `C<path>` - change the remote working directory.
    Cwd(String),
    /// `L` - stream a directory listing over the data channel.
    List,
    /// `G<path>` - send a file over the data channel.
    Get(String),
    /// `P<path>` - receive a file over the data channel.
    Put(String),
    /// `Q` - close the session.
    Quit,
}

/// Parses one non-empty control line (newline already stripped).
///
/// Verbs that take no argument reject trailing text; verbs that require a
/// path reject an empty one. Each misuse yields a distinct error so the
/// server can answer with a specific `E` line.
pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    let mut chars = line.chars();
    let Some(verb) = chars.next() else {
        return Err(ProtocolError::UnknownVerb(' '));
    };
    let arg = chars.as_str().trim_start_matches(' ');

    match verb {
        'D' if arg.is_empty() => Ok(Command::Data),
        'L' if arg.is_empty() => Ok(Command::List),
        'Q' if arg.is_empty() => Ok(Command::Quit),
        'D' | 'L' | 'Q' => Err(ProtocolError::UnexpectedArgument(verb)),
        'C' | 'G' | 'P' if arg.is_empty() => Err(ProtocolError::MissingArgument(verb)),
        'C' => Ok(Command::Cwd(arg.to_string())),
        'G' => Ok(Command::Get(arg.to_string())),
        'P' => Ok(Command::Put(arg.to_string())),
        _ => Err(ProtocolError::UnknownVerb(verb)),
    }
}
