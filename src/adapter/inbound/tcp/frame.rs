//! Length-prefixed frame codec.
//!
//! A frame is a little-endian `u32` byte count followed by that many bytes
//! of payload:
//!
//! ```text
//! ┌──────────────┬─────────────────────────┐
//! │ len: u32 LE  │ payload: [u8; len]      │
//! └──────────────┴─────────────────────────┘
//! ```
//!
//! Reads are split into [`FrameCodec::read_length`] and
//! [`FrameCodec::read_payload`] so callers can act between the two. Each
//! read is bounded by the codec's timeout, so a peer that promises more
//! bytes than it sends cannot hold a task forever.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::error::FrameError;

const LENGTH_PREFIX: usize = 4;

/// Reads and writes length-prefixed frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameCodec {
    max_frame_bytes: usize,
    read_timeout: Duration,
}

impl FrameCodec {
    #[must_use]
    pub const fn new(max_frame_bytes: usize, read_timeout: Duration) -> Self {
        Self {
            max_frame_bytes,
            read_timeout,
        }
    }

    #[must_use]
    pub const fn max_frame_bytes(&self) -> usize {
        self.max_frame_bytes
    }

    /// Read the 4-byte prefix and check it against the frame limit.
    ///
    /// # Errors
    ///
    /// [`FrameError::Timeout`] if the prefix does not arrive in time,
    /// [`FrameError::Io`] on a short read, [`FrameError::TooLarge`] if the
    /// declared length exceeds the limit.
    pub async fn read_length<R>(&self, reader: &mut R) -> Result<usize, FrameError>
    where
        R: AsyncRead + Unpin,
    {
        let mut prefix = [0u8; LENGTH_PREFIX];
        self.read_exact(reader, &mut prefix).await?;

        let len = u32::from_le_bytes(prefix) as usize;
        if len > self.max_frame_bytes {
            return Err(FrameError::TooLarge {
                len,
                max: self.max_frame_bytes,
            });
        }
        Ok(len)
    }

    /// Read exactly `len` payload bytes.
    ///
    /// # Errors
    ///
    /// [`FrameError::Timeout`] if the bytes do not arrive in time and
    /// [`FrameError::Io`] if the peer closes early.
    pub async fn read_payload<R>(&self, reader: &mut R, len: usize) -> Result<Vec<u8>, FrameError>
    where
        R: AsyncRead + Unpin,
    {
        let mut payload = vec![0u8; len];
        self.read_exact(reader, &mut payload).await?;
        Ok(payload)
    }

    /// Read one whole frame.
    ///
    /// # Errors
    ///
    /// See [`Self::read_length`] and [`Self::read_payload`].
    pub async fn read_frame<R>(&self, reader: &mut R) -> Result<Vec<u8>, FrameError>
    where
        R: AsyncRead + Unpin,
    {
        let len = self.read_length(reader).await?;
        self.read_payload(reader, len).await
    }

    /// Write `payload` as one frame and flush.
    ///
    /// # Errors
    ///
    /// [`FrameError::TooLarge`] if the payload does not fit a `u32` prefix,
    /// [`FrameError::Io`] if the write fails.
    pub async fn write_frame<W>(&self, writer: &mut W, payload: &[u8]) -> Result<(), FrameError>
    where
        W: AsyncWrite + Unpin,
    {
        let len = u32::try_from(payload.len()).map_err(|_| FrameError::TooLarge {
            len: payload.len(),
            max: u32::MAX as usize,
        })?;

        writer.write_all(&len.to_le_bytes()).await?;
        writer.write_all(payload).await?;
        writer.flush().await?;
        Ok(())
    }

    async fn read_exact<R>(&self, reader: &mut R, buf: &mut [u8]) -> Result<(), FrameError>
    where
        R: AsyncRead + Unpin,
    {
        match timeout(self.read_timeout, reader.read_exact(buf)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(FrameError::Timeout(self.read_timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use tokio_test::io::Builder;

    use super::*;

    fn codec() -> FrameCodec {
        FrameCodec::new(1024, Duration::from_millis(100))
    }

    #[tokio::test]
    async fn reads_split_frame() {
        let mut io = Builder::new()
            .read(&5u32.to_le_bytes()[..2])
            .read(&5u32.to_le_bytes()[2..])
            .read(b"he")
            .read(b"llo")
            .build();

        let payload = codec().read_frame(&mut io).await.unwrap();
        assert_eq!(payload, b"hello");
    }

    #[tokio::test]
    async fn writes_prefix_then_payload() {
        let mut io = Builder::new()
            .write(&3u32.to_le_bytes())
            .write(b"abc")
            .build();

        codec().write_frame(&mut io, b"abc").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_oversized_length_before_reading_payload() {
        let mut io = Builder::new().read(&4096u32.to_le_bytes()).build();

        let result = codec().read_length(&mut io).await;
        assert!(matches!(
            result,
            Err(FrameError::TooLarge {
                len: 4096,
                max: 1024
            })
        ));
    }

    #[tokio::test]
    async fn short_payload_is_unexpected_eof() {
        let mut io = Builder::new()
            .read(&10u32.to_le_bytes())
            .read(b"abc")
            .build();

        let result = codec().read_frame(&mut io).await;
        match result {
            Err(FrameError::Io(err)) => assert_eq!(err.kind(), ErrorKind::UnexpectedEof),
            other => panic!("expected unexpected EOF, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stalled_payload_times_out() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&10u32.to_le_bytes()).await.unwrap();
        client.write_all(b"abc").await.unwrap();

        // `client` stays open, so the read waits rather than hitting EOF.
        let result = codec().read_frame(&mut server).await;
        assert!(matches!(result, Err(FrameError::Timeout(_))));
        drop(client);
    }

    #[tokio::test]
    async fn zero_length_frame_is_empty() {
        let mut io = Builder::new().read(&0u32.to_le_bytes()).build();

        let payload = codec().read_frame(&mut io).await.unwrap();
        assert!(payload.is_empty());
    }
}
