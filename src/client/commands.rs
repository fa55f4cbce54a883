//! Module `commands`
//!
//! Parses interactive client input into the `ClientCommand` enum. Remote
//! commands map onto protocol verbs; `cd` and `ls` are purely local and
//! never touch the control channel.

/// One line of interactive input.
#[derive(Debug, PartialEq)]
pub enum ClientCommand {
    /// `cd <path>` - change the local working directory.
    Cd(String),
    /// `ls` - list the local working directory.
    Ls,
    /// `rcd <path>` - change the remote working directory (`C`).
    Rcd(String),
    /// `rls` - remote listing over the data channel (`L`).
    Rls,
    /// `get <file>` - download into a local file of the same base name (`G`).
    Get(String),
    /// `show <file>` - download and display on stdout (`G`).
    Show(String),
    /// `put <file>` - upload a local file (`P`).
    Put(String),
    /// `exit` - send `Q` and leave.
    Exit,
    /// Blank input; reprompt silently.
    Empty,
    Unknown(String),
}

/// Parses one line of user input. The first word selects the command; the
/// rest is the argument. Argument presence is checked by the operations so
/// they can print usage diagnostics.
pub fn parse_input(line: &str) -> ClientCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ClientCommand::Empty;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let word = parts.next().unwrap_or("");
    let arg = parts.next().unwrap_or("").trim();

    match word {
        "cd" => ClientCommand::Cd(arg.to_string()),
        "ls" if arg.is_empty() => ClientCommand::Ls,
        "rcd" => ClientCommand::Rcd(arg.to_string()),
        "rls" if arg.is_empty() => ClientCommand::Rls,
        "get" => ClientCommand::Get(arg.to_string()),
        "show" => ClientCommand::Show(arg.to_string()),
        "put" => ClientCommand::Put(arg.to_string()),
        "exit" if arg.is_empty() => ClientCommand::Exit,
        _ => ClientCommand::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_commands() {
        assert_eq!(parse_input("ls"), ClientCommand::Ls);
        assert_eq!(parse_input("cd /tmp"), ClientCommand::Cd("/tmp".to_string()));
        assert_eq!(parse_input("exit"), ClientCommand::Exit);
    }

    #[test]
    fn test_parse_remote_commands() {
        assert_eq!(parse_input("rls"), ClientCommand::Rls);
        assert_eq!(
            parse_input("rcd /srv/files"),
            ClientCommand::Rcd("/srv/files".to_string())
        );
        assert_eq!(
            parse_input("get report.txt"),
            ClientCommand::Get("report.txt".to_string())
        );
        assert_eq!(
            parse_input("show notes.md"),
            ClientCommand::Show("notes.md".to_string())
        );
        assert_eq!(
            parse_input("put data.bin"),
            ClientCommand::Put("data.bin".to_string())
        );
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse_input("  exit  "), ClientCommand::Exit);
        assert_eq!(
            parse_input("get   spaced.txt  "),
            ClientCommand::Get("spaced.txt".to_string())
        );
        assert_eq!(parse_input(""), ClientCommand::Empty);
        assert_eq!(parse_input("   "), ClientCommand::Empty);
    }

    #[test]
    fn test_missing_argument_is_kept_for_usage_diagnostics() {
        assert_eq!(parse_input("get"), ClientCommand::Get(String::new()));
        assert_eq!(parse_input("cd"), ClientCommand::Cd(String::new()));
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            parse_input("fetch x"),
            ClientCommand::Unknown("fetch x".to_string())
        );
        assert_eq!(
            parse_input("ls -l"),
            ClientCommand::Unknown("ls -l".to_string()),
            "local ls takes no argument"
        );
        assert_eq!(
            parse_input("exit now"),
            ClientCommand::Unknown("exit now".to_string())
        );
    }
}
