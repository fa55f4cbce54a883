//! Module `session`
//!
//! Per-connection server state and the control-channel read loop. Each
//! session owns its control connection, an explicit working directory, and
//! at most one pending data listener; nothing is shared between sessions.
//!
//! The data-channel side of the session is a two-state machine: `Idle` (no
//! listener) and awaiting a data connection (listener installed by `D`).
//! `L`/`G`/`P` consume the listener and return the session to `Idle`; a new
//! `D` replaces any unconsumed listener.

use log::{error, info, warn};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::protocol::parse_command;
use crate::protocol::response::Response;
use crate::server::config::ServerConfig;
use crate::server::handlers::{self, SessionFlow};

/// State owned by one client's control connection.
pub struct Session {
    peer: SocketAddr,
    cwd: PathBuf,
    data_listener: Option<TcpListener>,
}

impl Session {
    pub fn new(peer: SocketAddr, cwd: PathBuf) -> Self {
        Self {
            peer,
            cwd,
            data_listener: None,
        }
    }

    pub fn peer(&self) -> &SocketAddr {
        &self.peer
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    /// Resolves a remote path against the session working directory.
    /// Absolute paths stand on their own.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.cwd.join(path)
    }

    /// Installs a fresh data listener. The caller discards any unconsumed
    /// predecessor first, so a failed bind leaves the session with none.
    pub fn install_data_listener(&mut self, listener: TcpListener) {
        self.data_listener = Some(listener);
    }

    /// Consumes the pending data listener, returning the session to `Idle`.
    pub fn take_data_listener(&mut self) -> Option<TcpListener> {
        self.data_listener.take()
    }
}

/// Drives one client session: reads command lines, dispatches them, and
/// tears everything down on `Q` or disconnect. End-of-stream on the control
/// channel is an implicit quit.
pub async fn handle_session(stream: TcpStream, peer: SocketAddr, config: Arc<ServerConfig>) {
    let cwd = match initial_cwd(&config).await {
        Ok(dir) => dir,
        Err(e) => {
            error!("Cannot resolve server root for client {}: {}", peer, e);
            return;
        }
    };

    let mut session = Session::new(peer, cwd);
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = match read_command_line(&mut reader, &mut line, &config).await {
            Ok(n) => n,
            Err(e) => {
                error!("Failed to read from {}: {}", peer, e);
                break;
            }
        };
        if n == 0 {
            info!("Connection closed by client {}", peer);
            break;
        }

        // Truncate at the protocol cap and hand the rest to the parser.
        line.truncate(config.max_line_length);
        let text = String::from_utf8_lossy(&line);
        let trimmed = text.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            continue;
        }

        let flow = match parse_command(trimmed) {
            Ok(command) => {
                info!("Received from {}: {:?}", peer, command);
                match handlers::handle_command(&mut session, &command, &mut write_half, &config)
                    .await
                {
                    Ok(flow) => flow,
                    Err(e) => {
                        error!("Control channel to {} broken: {}", peer, e);
                        break;
                    }
                }
            }
            Err(e) => {
                warn!("Protocol error from {}: {}", peer, e);
                let response = Response::error(e.to_string());
                if write_half.write_all(response.encode().as_bytes()).await.is_err() {
                    break;
                }
                SessionFlow::Continue
            }
        };

        if flow == SessionFlow::Quit {
            info!("Client {} requested to quit", peer);
            break;
        }
    }

    // Dropping the session closes any pending data listener.
    info!("Client {} disconnected", peer);
}

/// Reads one line, honoring the optional idle timeout. An expired timeout is
/// reported as end-of-stream so the session winds down normally.
async fn read_command_line(
    reader: &mut BufReader<tokio::net::tcp::OwnedReadHalf>,
    line: &mut Vec<u8>,
    config: &ServerConfig,
) -> std::io::Result<usize> {
    match config.idle_timeout() {
        Some(limit) => match tokio::time::timeout(limit, reader.read_until(b'\n', line)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Idle timeout after {:?}, dropping session", limit);
                Ok(0)
            }
        },
        None => reader.read_until(b'\n', line).await,
    }
}

async fn initial_cwd(config: &ServerConfig) -> std::io::Result<PathBuf> {
    tokio::fs::canonicalize(config.server_root_path()).await
}
