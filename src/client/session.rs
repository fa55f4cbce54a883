//! Module `session`
//!
//! The client's end of the control channel, plus data-channel negotiation:
//! send `D`, parse the `A<port>` acknowledgment, connect back to the
//! announced port. A failed negotiation aborts the requested operation with
//! no side effects on the control channel.

use log::{debug, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::error::ClientError;
use crate::protocol::response::{Response, parse_port};

/// The client's persistent control connection to one server.
pub struct ClientSession {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    server_host: String,
}

impl ClientSession {
    /// Connects the control channel. Resolution and connection failures here
    /// happen before any session exists and are fatal to the client.
    pub async fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let stream = TcpStream::connect((host, port)).await?;
        info!("Control channel connected to {}:{}", host, port);

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            server_host: host.to_string(),
        })
    }

    /// Sends one command line over the control channel.
    pub async fn send_command(&mut self, line: &str) -> Result<(), ClientError> {
        debug!("-> {}", line);
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Reads the single response line paired with the last command.
    pub async fn read_response(&mut self) -> Result<Response, ClientError> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(ClientError::ConnectionClosed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        debug!("<- {}", trimmed);
        Ok(Response::parse(trimmed)?)
    }

    /// Reads a response and requires a bare acknowledgment, turning an `E`
    /// line into `ClientError::Server`.
    pub async fn expect_ack(&mut self) -> Result<(), ClientError> {
        match self.read_response().await? {
            Response::Ack(_) => Ok(()),
            Response::Error(msg) => Err(ClientError::Server(msg)),
        }
    }

    /// Negotiates a fresh data channel: `D`, parse `A<port>`, connect back.
    pub async fn open_data_channel(&mut self) -> Result<TcpStream, ClientError> {
        self.send_command("D").await?;
        let port = match self.read_response().await? {
            Response::Ack(payload) => parse_port(&payload)?,
            Response::Error(msg) => return Err(ClientError::Server(msg)),
        };

        let data = TcpStream::connect((self.server_host.as_str(), port)).await?;
        debug!("Data channel connected on port {}", port);
        Ok(data)
    }

    /// Sends `Q` and waits for the final acknowledgment.
    pub async fn quit(&mut self) -> Result<(), ClientError> {
        self.send_command("Q").await?;
        self.expect_ack().await
    }
}
