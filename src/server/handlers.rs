//! Module `handlers`
//!
//! Server-side command dispatch. Each handler writes its control-channel
//! response directly and, for `L`/`G`/`P`, moves the payload over the data
//! channel. The acknowledgment for a transfer is written only after the data
//! connection is accepted and the local source or target is confirmed
//! usable; a transfer that then fails mid-stream is logged and abandoned
//! with no further control traffic.

use log::{error, info};
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::protocol::Command;
use crate::protocol::response::Response;
use crate::server::config::ServerConfig;
use crate::server::session::Session;
use crate::transfer::{self, file_ops};

/// Whether the session continues after a command.
#[derive(Debug, PartialEq)]
pub enum SessionFlow {
    Continue,
    Quit,
}

/// Dispatches one parsed command. Errors are control-channel write failures;
/// everything else is answered with an `E` line and the session continues.
pub async fn handle_command<W>(
    session: &mut Session,
    command: &Command,
    ctrl: &mut W,
    config: &ServerConfig,
) -> io::Result<SessionFlow>
where
    W: AsyncWrite + Unpin,
{
    match command {
        Command::Data => handle_data(session, ctrl, config).await,
        Command::Cwd(path) => handle_cwd(session, path, ctrl).await,
        Command::List => handle_list(session, ctrl).await,
        Command::Get(path) => handle_get(session, path, ctrl, config).await,
        Command::Put(path) => handle_put(session, path, ctrl, config).await,
        Command::Quit => handle_quit(ctrl).await,
    }
}

async fn respond<W>(ctrl: &mut W, response: Response) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    ctrl.write_all(response.encode().as_bytes()).await
}

/// `D`: open a fresh ephemeral listener and announce its port. Any previous
/// unconsumed listener is closed first; on failure none is left installed.
async fn handle_data<W>(
    session: &mut Session,
    ctrl: &mut W,
    config: &ServerConfig,
) -> io::Result<SessionFlow>
where
    W: AsyncWrite + Unpin,
{
    // Replace-before-bind: the old listener must be gone even if the new
    // bind fails.
    if session.take_data_listener().is_some() {
        info!(
            "Discarding unconsumed data listener for client {}",
            session.peer()
        );
    }

    match transfer::open_data_listener(&config.bind_address).await {
        Ok((listener, port)) => {
            info!("Data listener on port {} for client {}", port, session.peer());
            session.install_data_listener(listener);
            respond(ctrl, Response::ack_port(port)).await?;
        }
        Err(e) => {
            error!("Data listener setup failed for {}: {}", session.peer(), e);
            respond(ctrl, Response::error(e.to_string())).await?;
        }
    }
    Ok(SessionFlow::Continue)
}

/// `C`: change the session working directory. Purely per-session state; the
/// data-channel state is untouched.
async fn handle_cwd<W>(session: &mut Session, path: &str, ctrl: &mut W) -> io::Result<SessionFlow>
where
    W: AsyncWrite + Unpin,
{
    let target = session.resolve(path);
    let response = match tokio::fs::canonicalize(&target).await {
        Ok(resolved) => match tokio::fs::metadata(&resolved).await {
            Ok(meta) if meta.is_dir() => {
                info!(
                    "Client {} changed directory to {}",
                    session.peer(),
                    resolved.display()
                );
                session.set_cwd(resolved);
                Response::ok()
            }
            Ok(_) => Response::error(format!(
                "cannot change directory to '{}': not a directory",
                path
            )),
            Err(e) => Response::error(format!("cannot change directory to '{}': {}", path, e)),
        },
        Err(e) => Response::error(format!("cannot change directory to '{}': {}", path, e)),
    };

    respond(ctrl, response).await?;
    Ok(SessionFlow::Continue)
}

/// `L`: stream a directory listing of the session cwd over the data channel,
/// then ack once the listing process has exited.
async fn handle_list<W>(session: &mut Session, ctrl: &mut W) -> io::Result<SessionFlow>
where
    W: AsyncWrite + Unpin,
{
    let Some(mut data) = consume_data_channel(session, ctrl).await? else {
        return Ok(SessionFlow::Continue);
    };

    let response = match transfer::stream_listing(session.cwd(), &mut data).await {
        Ok(()) => {
            info!("Listing sent to client {}", session.peer());
            Response::ok()
        }
        Err(e) => {
            error!("Listing failed for {}: {}", session.peer(), e);
            Response::error(e.to_string())
        }
    };

    drop(data);
    respond(ctrl, response).await?;
    Ok(SessionFlow::Continue)
}

/// `G`: validate the file is openable, ack, then stream it out. The end of
/// the file is signaled by closing the data connection.
async fn handle_get<W>(
    session: &mut Session,
    path: &str,
    ctrl: &mut W,
    config: &ServerConfig,
) -> io::Result<SessionFlow>
where
    W: AsyncWrite + Unpin,
{
    let Some(mut data) = consume_data_channel(session, ctrl).await? else {
        return Ok(SessionFlow::Continue);
    };

    let resolved = session.resolve(path);
    let mut file = match File::open(&resolved).await {
        Ok(file) => file,
        Err(e) => {
            respond(ctrl, Response::error(format!("cannot open '{}': {}", path, e))).await?;
            return Ok(SessionFlow::Continue);
        }
    };

    respond(ctrl, Response::ok()).await?;
    info!("Transmitting '{}' to client {}", path, session.peer());

    if let Err(e) = file_ops::send_file(&mut file, &mut data, config.buffer_size, path).await {
        // Partial transfer; the client sees the early close.
        error!("Transfer of '{}' to {} aborted: {}", path, session.peer(), e);
    }
    Ok(SessionFlow::Continue)
}

/// `P`: validate the target is creatable, ack, then stream bytes in until
/// the client closes the data connection. A mid-stream failure leaves a
/// partial file.
async fn handle_put<W>(
    session: &mut Session,
    path: &str,
    ctrl: &mut W,
    config: &ServerConfig,
) -> io::Result<SessionFlow>
where
    W: AsyncWrite + Unpin,
{
    let Some(mut data) = consume_data_channel(session, ctrl).await? else {
        return Ok(SessionFlow::Continue);
    };

    let resolved = session.resolve(path);
    let mut file = match File::create(&resolved).await {
        Ok(file) => file,
        Err(e) => {
            respond(ctrl, Response::error(format!("cannot create '{}': {}", path, e))).await?;
            return Ok(SessionFlow::Continue);
        }
    };

    respond(ctrl, Response::ok()).await?;
    info!("Receiving '{}' from client {}", path, session.peer());

    match file_ops::copy_chunked(&mut data, &mut file, config.buffer_size).await {
        Ok(total) => info!("Received '{}' ({} bytes)", path, total),
        Err(e) => error!("Upload of '{}' from {} aborted: {}", path, session.peer(), e),
    }
    Ok(SessionFlow::Continue)
}

/// `Q`: ack, then signal the session loop to close the control channel.
async fn handle_quit<W>(ctrl: &mut W) -> io::Result<SessionFlow>
where
    W: AsyncWrite + Unpin,
{
    respond(ctrl, Response::ok()).await?;
    Ok(SessionFlow::Quit)
}

/// Consumes the pending data listener and accepts its single connection.
/// Without a prior `D` this is a protocol error; either way the session is
/// back in `Idle` afterwards.
async fn consume_data_channel<W>(
    session: &mut Session,
    ctrl: &mut W,
) -> io::Result<Option<TcpStream>>
where
    W: AsyncWrite + Unpin,
{
    let Some(listener) = session.take_data_listener() else {
        respond(ctrl, Response::error("no data connection established")).await?;
        return Ok(None);
    };

    let peer = *session.peer();
    match transfer::accept_data_connection(listener, &peer).await {
        Ok(stream) => Ok(Some(stream)),
        Err(e) => {
            error!("Data accept failed for {}: {}", peer, e);
            respond(ctrl, Response::error(e.to_string())).await?;
            Ok(None)
        }
    }
}
