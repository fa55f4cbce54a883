//! Module `operations`
//!
//! The client-side operations behind each interactive command. Remote
//! operations negotiate a fresh data channel per transfer; local ones only
//! touch the client process.

use log::info;
use std::path::Path;
use std::process::Stdio;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::client::session::ClientSession;
use crate::error::ClientError;
use crate::transfer::file_ops;

const BUFFER_SIZE: usize = 8192;

impl ClientSession {
    /// `rcd`: change the remote working directory.
    pub async fn remote_cd(&mut self, path: &str) -> Result<(), ClientError> {
        self.send_command(&format!("C{}", path)).await?;
        self.expect_ack().await?;
        println!("Remote directory changed to {}", path);
        Ok(())
    }

    /// `rls`: stream the remote listing to stdout, then collect the ack.
    pub async fn remote_ls(&mut self) -> Result<(), ClientError> {
        let mut data = self.open_data_channel().await?;
        self.send_command("L").await?;

        let mut stdout = tokio::io::stdout();
        file_ops::copy_chunked(&mut data, &mut stdout, BUFFER_SIZE).await?;
        drop(data);

        self.expect_ack().await
    }

    /// `get`: download into a local file named by the remote path's base
    /// name, created/truncated once the server acks.
    pub async fn get(&mut self, path: &str) -> Result<(), ClientError> {
        let mut data = self.request_file(path).await?;

        let local = Path::new(base_name(path));
        let total = file_ops::receive_file(&mut data, local, BUFFER_SIZE).await?;
        info!("Downloaded '{}' ({} bytes)", local.display(), total);
        Ok(())
    }

    /// `show`: download and write to stdout instead of a file.
    pub async fn show(&mut self, path: &str) -> Result<(), ClientError> {
        let mut data = self.request_file(path).await?;

        let mut stdout = tokio::io::stdout();
        file_ops::copy_chunked(&mut data, &mut stdout, BUFFER_SIZE).await?;
        stdout.flush().await?;
        Ok(())
    }

    /// `put`: upload a local file. The file is opened before anything is
    /// sent, so a missing file has no network side effects.
    pub async fn put(&mut self, path: &str) -> Result<(), ClientError> {
        let mut file = File::open(path).await?;

        let mut data = self.open_data_channel().await?;
        self.send_command(&format!("P{}", path)).await?;
        self.expect_ack().await?;

        let total = file_ops::send_file(&mut file, &mut data, BUFFER_SIZE, path).await?;
        info!("Uploaded '{}' ({} bytes)", path, total);
        Ok(())
    }

    /// Shared `G` preamble: negotiate the data channel, send the command,
    /// and require the ack before any payload is read.
    async fn request_file(&mut self, path: &str) -> Result<tokio::net::TcpStream, ClientError> {
        let data = self.open_data_channel().await?;
        self.send_command(&format!("G{}", path)).await?;
        self.expect_ack().await?;
        Ok(data)
    }
}

/// Final path component, used to name downloaded files locally.
fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// `cd`: change the client's local working directory.
pub fn local_cd(path: &str) -> std::io::Result<()> {
    std::env::set_current_dir(path)
}

/// `ls`: run the local listing command with inherited stdio.
pub async fn local_ls() -> std::io::Result<()> {
    let status = Command::new("ls")
        .arg("-l")
        .stdin(Stdio::null())
        .status()
        .await?;
    if !status.success() {
        return Err(std::io::Error::other(format!("ls exited with {}", status)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("report.txt"), "report.txt");
        assert_eq!(base_name("docs/report.txt"), "report.txt");
        assert_eq!(base_name("/srv/files/report.txt"), "report.txt");
    }
}
