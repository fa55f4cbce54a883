//! Module `listing`
//!
//! Directory listings are delegated to an external listing command whose
//! standard output is streamed to the data connection. The listing format is
//! not part of the wire contract, only the transport of its bytes.

use log::warn;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

use crate::error::TransferError;

const LIST_PROGRAM: &str = "ls";
const LIST_ARGS: &[&str] = &["-l"];

/// Runs the listing command in `dir` and streams its stdout into `out`.
/// Returns once the process has exited and all bytes are flushed.
pub async fn stream_listing<W>(dir: &Path, out: &mut W) -> Result<(), TransferError>
where
    W: AsyncWrite + Unpin,
{
    let mut child = Command::new(LIST_PROGRAM)
        .args(LIST_ARGS)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(TransferError::ListingFailed)?;

    // Piped stdout is always present after a successful spawn.
    if let Some(mut stdout) = child.stdout.take() {
        tokio::io::copy(&mut stdout, out).await?;
    }

    let status = child.wait().await.map_err(TransferError::ListingFailed)?;
    if !status.success() {
        warn!("Listing command exited with {} for {}", status, dir.display());
    }

    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_names_directory_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("alpha.txt"), b"a").unwrap();
        std::fs::write(dir.path().join("beta.txt"), b"b").unwrap();

        let mut out = Vec::new();
        stream_listing(dir.path(), &mut out).await.unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("alpha.txt"));
        assert!(text.contains("beta.txt"));
    }

    #[tokio::test]
    async fn test_listing_missing_directory_fails() {
        let mut out = Vec::new();
        let result = stream_listing(Path::new("/definitely/not/here"), &mut out).await;
        assert!(result.is_err());
    }
}
