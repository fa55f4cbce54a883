//! Module `response`
//!
//! Control-channel response lines. Every response is one line starting with
//! `A` (acknowledge, optionally carrying a value such as a data port) or `E`
//! (error with a human-readable message).

use crate::error::ProtocolError;

/// A control-channel response sent from server to client.
#[derive(Debug, PartialEq)]
pub enum Response {
    /// `A<payload>` - success; the payload is empty except for the
    /// data-channel ack, which carries the listener port.
    Ack(String),
    /// `E<message>` - failure with a human-readable message.
    Error(String),
}

impl Response {
    /// Bare acknowledgment (`A`).
    pub fn ok() -> Self {
        Response::Ack(String::new())
    }

    /// Data-channel acknowledgment carrying the listener port (`A<port>`).
    pub fn ack_port(port: u16) -> Self {
        Response::Ack(port.to_string())
    }

    /// Error response (`E<message>`).
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(message.into())
    }

    /// Encodes the response as a newline-terminated wire line.
    pub fn encode(&self) -> String {
        match self {
            Response::Ack(payload) => format!("A{payload}\n"),
            Response::Error(message) => format!("E{message}\n"),
        }
    }

    /// Parses one response line (newline already stripped).
    pub fn parse(line: &str) -> Result<Response, ProtocolError> {
        match line.chars().next() {
            Some('A') => Ok(Response::Ack(line[1..].to_string())),
            Some('E') => Ok(Response::Error(line[1..].to_string())),
            _ => Err(ProtocolError::MalformedResponse(line.to_string())),
        }
    }
}

/// Parses and validates the port payload of a data-channel ack.
///
/// The port must be a decimal number in 1..=65535.
pub fn parse_port(payload: &str) -> Result<u16, ProtocolError> {
    match payload.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(ProtocolError::InvalidPort(payload.to_string())),
        Ok(port) => Ok(port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(Response::ok().encode(), "A\n");
        assert_eq!(Response::ack_port(53417).encode(), "A53417\n");
        assert_eq!(Response::error("no such file").encode(), "Eno such file\n");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Response::parse("A"), Ok(Response::Ack(String::new())));
        assert_eq!(
            Response::parse("A53417"),
            Ok(Response::Ack("53417".to_string()))
        );
        assert_eq!(
            Response::parse("Eno such file"),
            Ok(Response::Error("no such file".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Response::parse("220 hello"),
            Err(ProtocolError::MalformedResponse(_))
        ));
        assert!(matches!(
            Response::parse(""),
            Err(ProtocolError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("53417"), Ok(53417));
        assert_eq!(parse_port("1"), Ok(1));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert!(parse_port("0").is_err());
        assert!(parse_port("65536").is_err());
        assert!(parse_port("-1").is_err());
        assert!(parse_port("port").is_err());
        assert!(parse_port("").is_err());
    }
}
