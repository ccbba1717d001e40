//! Minimal client for the framed protocol.

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, ToSocketAddrs};

use super::frame::FrameCodec;
use crate::domain::{PlayerRequest, Rating};
use crate::error::{FrameError, Result};

/// Largest reply the client will accept.
const MAX_REPLY_BYTES: usize = 16 * 1024 * 1024;

/// Send one batch and wait for its ratings.
///
/// `timeout` bounds each read of the reply, not the whole exchange; the
/// server answers only once every player in the batch is resolved.
///
/// # Errors
///
/// Returns an error if the connection fails, the server closes without a
/// reply, or the reply is not a JSON ratings array.
pub async fn query<A: ToSocketAddrs>(
    addr: A,
    requests: &[PlayerRequest],
    timeout: Duration,
) -> Result<Vec<Rating>> {
    let codec = FrameCodec::new(MAX_REPLY_BYTES, timeout);
    let mut stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
        .await
        .map_err(|_| FrameError::Timeout(timeout))??;

    let payload = serde_json::to_vec(requests)?;
    codec.write_frame(&mut stream, &payload).await?;

    let reply = codec.read_frame(&mut stream).await?;
    let _ = stream.shutdown().await;

    Ok(serde_json::from_slice(&reply)?)
}
