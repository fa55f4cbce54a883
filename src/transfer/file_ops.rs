//! Module `file_ops`
//!
//! Streams payload bytes in fixed-size chunks between a file and the data
//! channel, in both directions. A transfer that fails mid-stream stops early
//! and leaves a partial file; there is no rollback and no resumption.

use log::info;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

/// Copies bytes from `reader` to `writer` in `buffer_size` chunks until
/// end-of-stream. Returns the number of bytes moved.
pub async fn copy_chunked<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer_size: usize,
) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n]).await?;
        total += n as u64;
    }

    writer.flush().await?;
    Ok(total)
}

/// Sends a local file over the data connection (`G` on the server, `put` on
/// the client). The file must already be open; end of transfer is signaled
/// by closing the connection, which the caller does by dropping it.
pub async fn send_file(
    file: &mut File,
    data: &mut TcpStream,
    buffer_size: usize,
    name: &str,
) -> std::io::Result<u64> {
    let total = copy_chunked(file, data, buffer_size).await?;
    info!("Sent '{}' ({} bytes)", name, total);
    Ok(total)
}

/// Receives a file from the data connection into `path`, creating or
/// truncating it first (`P` on the server, `get` on the client). Reads until
/// the peer closes the connection.
pub async fn receive_file(
    data: &mut TcpStream,
    path: &Path,
    buffer_size: usize,
) -> std::io::Result<u64> {
    let mut file = File::create(path).await?;
    let total = copy_chunked(data, &mut file, buffer_size).await?;
    info!("Received '{}' ({} bytes)", path.display(), total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_copy_chunked_moves_all_bytes() {
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let (mut tx, mut rx) = tokio::io::duplex(1 << 16);

        tx.write_all(&payload).await.unwrap();
        tx.shutdown().await.unwrap();

        let mut out = Vec::new();
        let total = copy_chunked(&mut rx, &mut out, 128).await.unwrap();

        assert_eq!(total, payload.len() as u64);
        assert_eq!(out, payload);
    }

    #[tokio::test]
    async fn test_copy_chunked_empty_stream() {
        let (mut tx, mut rx) = tokio::io::duplex(64);
        tx.shutdown().await.unwrap();

        let mut out = Vec::new();
        let total = copy_chunked(&mut rx, &mut out, 64).await.unwrap();

        assert_eq!(total, 0);
        assert!(out.is_empty());
    }
}
