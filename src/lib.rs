//! MFTP - Minimal File Transfer Protocol
//!
//! A two-socket file transfer protocol: a persistent control channel carries
//! newline-terminated commands and responses, and a fresh per-operation data
//! channel carries raw file or listing bytes (passive-mode style).

pub mod client;
pub mod error;
pub mod protocol;
pub mod server;
pub mod transfer;

pub use server::{Server, ServerConfig};
