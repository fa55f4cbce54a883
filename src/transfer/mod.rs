//! Transfer module
//!
//! Data-channel lifecycle (ephemeral listeners, single accept) and payload
//! streaming between files, processes, and sockets.

pub mod data_channel;
pub mod file_ops;
pub mod listing;

pub use data_channel::{accept_data_connection, open_data_listener};
pub use file_ops::copy_chunked;
pub use listing::stream_listing;
