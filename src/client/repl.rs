//! Module `repl`
//!
//! The interactive command loop: prompt, read a line, dispatch. Operation
//! failures print a diagnostic and the loop continues; only `exit`,
//! end-of-input, or a broken control channel end it.

use log::warn;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::commands::{ClientCommand, parse_input};
use crate::client::operations;
use crate::client::session::ClientSession;
use crate::error::ClientError;

const PROMPT: &str = "MFTP> ";

/// Runs the interactive loop until `exit` or end-of-input.
pub async fn run(session: &mut ClientSession) -> Result<(), ClientError> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            // End of input behaves like `exit`.
            session.quit().await?;
            return Ok(());
        };

        match dispatch(session, parse_input(&line)).await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e @ ClientError::ConnectionClosed) => return Err(e),
            Err(e) => eprintln!("mftp: {}", e),
        }
    }
}

/// Handles one parsed command. Returns `true` when the session is over.
async fn dispatch(session: &mut ClientSession, command: ClientCommand) -> Result<bool, ClientError> {
    match command {
        ClientCommand::Empty => {}
        ClientCommand::Cd(path) if path.is_empty() => usage("cd <path>"),
        ClientCommand::Cd(path) => {
            if let Err(e) = operations::local_cd(&path) {
                eprintln!("mftp: cd '{}': {}", path, e);
            }
        }
        ClientCommand::Ls => {
            if let Err(e) = operations::local_ls().await {
                eprintln!("mftp: ls: {}", e);
            }
        }
        ClientCommand::Rcd(path) if path.is_empty() => usage("rcd <path>"),
        ClientCommand::Rcd(path) => session.remote_cd(&path).await?,
        ClientCommand::Rls => session.remote_ls().await?,
        ClientCommand::Get(path) if path.is_empty() => usage("get <filename>"),
        ClientCommand::Get(path) => session.get(&path).await?,
        ClientCommand::Show(path) if path.is_empty() => usage("show <filename>"),
        ClientCommand::Show(path) => session.show(&path).await?,
        ClientCommand::Put(path) if path.is_empty() => usage("put <filename>"),
        ClientCommand::Put(path) => session.put(&path).await?,
        ClientCommand::Exit => {
            if let Err(e) = session.quit().await {
                warn!("Quit handshake failed: {}", e);
            }
            return Ok(true);
        }
        ClientCommand::Unknown(text) => eprintln!("mftp: unknown command: {}", text),
    }
    Ok(false)
}

fn usage(text: &str) {
    eprintln!("Usage: {}", text);
}
