//! Module `core`
//!
//! The connection acceptor. Binds the well-known control port and hands each
//! accepted connection to an independently scheduled task, so one client's
//! blocking transfer never stalls another's command processing. Finished
//! tasks are reclaimed by the runtime; the accept loop never waits on them.

use log::{error, info};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::server::config::ServerConfig;
use crate::server::session;

pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds the control listener. A bind failure is fatal to startup and is
    /// reported to the caller.
    pub async fn bind(config: ServerConfig, port: u16) -> io::Result<Self> {
        let socket = config.control_socket(port);
        let listener = TcpListener::bind(&socket).await?;
        info!("Server bound to {}", socket);

        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    /// Address the control listener is bound to. With port 0 this reveals
    /// the OS-assigned port.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until the process is killed. Each accepted
    /// control connection gets its own task with fully isolated session
    /// state.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("Connection established with client {}", addr);
                    let config = Arc::clone(&self.config);

                    tokio::spawn(async move {
                        session::handle_session(stream, addr, config).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
