//! Error types
//!
//! Defines domain-specific error types for the protocol, transfer, and client
//! modules. Server-side handlers turn these into `E` response lines; the
//! client prints them as local diagnostics.

use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Wire protocol errors: malformed commands and responses.
#[derive(Debug, PartialEq)]
pub enum ProtocolError {
    UnknownVerb(char),
    UnexpectedArgument(char),
    MissingArgument(char),
    MalformedResponse(String),
    InvalidPort(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownVerb(v) => write!(f, "unknown command '{}'", v),
            ProtocolError::UnexpectedArgument(v) => write!(f, "'{}' takes no argument", v),
            ProtocolError::MissingArgument(v) => write!(f, "'{}' requires an argument", v),
            ProtocolError::MalformedResponse(line) => {
                write!(f, "malformed server response: {:?}", line)
            }
            ProtocolError::InvalidPort(p) => write!(f, "invalid data port in server response: {:?}", p),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Data-channel errors on the server side.
#[derive(Debug)]
pub enum TransferError {
    BindFailed(io::Error),
    AcceptFailed(io::Error),
    UnauthorizedPeer(SocketAddr),
    ListingFailed(io::Error),
    Io(io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::BindFailed(e) => write!(f, "cannot open data channel: {}", e),
            TransferError::AcceptFailed(e) => write!(f, "cannot accept data connection: {}", e),
            TransferError::UnauthorizedPeer(addr) => {
                write!(f, "rejected data connection from foreign peer {}", addr)
            }
            TransferError::ListingFailed(e) => write!(f, "cannot list directory: {}", e),
            TransferError::Io(e) => write!(f, "data transfer failed: {}", e),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<io::Error> for TransferError {
    fn from(error: io::Error) -> Self {
        TransferError::Io(error)
    }
}

/// Client-side operation errors.
#[derive(Debug)]
pub enum ClientError {
    Io(io::Error),
    Protocol(ProtocolError),
    /// The server answered with an `E` line; carries its message.
    Server(String),
    /// The control channel hit end-of-stream.
    ConnectionClosed,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Io(e) => write!(f, "{}", e),
            ClientError::Protocol(e) => write!(f, "{}", e),
            ClientError::Server(msg) => write!(f, "server error: {}", msg),
            ClientError::ConnectionClosed => write!(f, "server closed the connection"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        ClientError::Io(error)
    }
}

impl From<ProtocolError> for ClientError {
    fn from(error: ProtocolError) -> Self {
        ClientError::Protocol(error)
    }
}
