//! Server core functionality
//!
//! Contains the accept loop, per-session state machine, command handlers,
//! and server configuration.

pub mod config;
pub mod core;
pub mod handlers;
pub mod session;

pub use config::ServerConfig;
pub use core::Server;
