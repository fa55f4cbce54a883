//! Module `data_channel`
//!
//! Server-side lifecycle of the per-operation data channel: an ephemeral
//! listener bound to an OS-assigned port, announced to the client over the
//! control channel, then consumed by exactly one accepted connection.

use log::{info, warn};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};

use crate::error::TransferError;

/// Binds a fresh ephemeral listener for one data transfer.
///
/// Binding to port 0 lets the OS pick the port, so no port-collision
/// bookkeeping is needed across sessions. Returns the listener together with
/// the chosen port for the `A<port>` acknowledgment.
pub async fn open_data_listener(bind_address: &str) -> Result<(TcpListener, u16), TransferError> {
    let listener = TcpListener::bind((bind_address, 0))
        .await
        .map_err(TransferError::BindFailed)?;
    let port = listener
        .local_addr()
        .map_err(TransferError::BindFailed)?
        .port();
    Ok((listener, port))
}

/// Accepts exactly one connection on a data listener and consumes it.
///
/// The listener is taken by value and dropped on return, so the announced
/// port stops accepting after the first connection. A connection from a host
/// other than the control-channel peer is shut down and rejected.
pub async fn accept_data_connection(
    listener: TcpListener,
    peer: &SocketAddr,
) -> Result<TcpStream, TransferError> {
    let (stream, remote) = listener.accept().await.map_err(TransferError::AcceptFailed)?;

    if remote.ip() != peer.ip() {
        warn!(
            "Rejected data connection from {} on channel owned by {}",
            remote, peer
        );
        return Err(TransferError::UnauthorizedPeer(remote));
    }

    info!("Data connection accepted from {} for client {}", remote, peer);
    Ok(stream)
}
