//! One request/response exchange per connection.
//!
//! ```text
//! AwaitingLength ──▶ AwaitingPayload ──▶ Processing ──▶ Responding ──▶ Closed
//!        │                  │                                 │           ▲
//!        └──────────────────┴──────────── error ──────────────┴───────────┘
//! ```
//!
//! Any framing or decoding failure skips straight to `Closed` without a
//! response. `Closed` always shuts the stream down.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::frame::FrameCodec;
use crate::application::BatchAggregator;
use crate::domain::{Rating, RequestBatch};
use crate::error::{Error, Result};

/// Connection lifecycle.
#[derive(Debug)]
enum ConnectionState {
    AwaitingLength,
    AwaitingPayload { len: usize },
    Processing { batch: RequestBatch },
    Responding { ratings: Vec<Rating> },
    Closed,
}

impl ConnectionState {
    const fn name(&self) -> &'static str {
        match self {
            Self::AwaitingLength => "awaiting_length",
            Self::AwaitingPayload { .. } => "awaiting_payload",
            Self::Processing { .. } => "processing",
            Self::Responding { .. } => "responding",
            Self::Closed => "closed",
        }
    }
}

/// Serves a single framed request on an accepted stream.
pub struct ConnectionHandler {
    aggregator: Arc<BatchAggregator>,
    codec: FrameCodec,
    request_deadline: Duration,
}

impl ConnectionHandler {
    #[must_use]
    pub const fn new(
        aggregator: Arc<BatchAggregator>,
        codec: FrameCodec,
        request_deadline: Duration,
    ) -> Self {
        Self {
            aggregator,
            codec,
            request_deadline,
        }
    }

    /// Run the exchange to completion and close the stream.
    ///
    /// Errors are logged, never returned: a broken client only ever costs
    /// its own connection.
    pub async fn handle<S>(&self, mut stream: S)
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        match self.serve(&mut stream).await {
            Ok(count) => info!(ratings = count, "Response sent"),
            Err(Error::Frame(err)) => warn!(error = %err, "Dropping connection: bad frame"),
            Err(Error::Json(err)) => warn!(error = %err, "Dropping connection: undecodable batch"),
            Err(err) => warn!(error = %err, "Dropping connection"),
        }

        debug!(state = ConnectionState::Closed.name(), "Connection state");
        if let Err(err) = stream.shutdown().await {
            debug!(error = %err, "Shutdown after exchange failed");
        }
    }

    /// Drive the state machine up to `Closed`, returning the number of
    /// ratings written.
    async fn serve<S>(&self, stream: &mut S) -> Result<usize>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut state = ConnectionState::AwaitingLength;
        let mut written = 0;

        loop {
            debug!(state = state.name(), "Connection state");
            state = match state {
                ConnectionState::AwaitingLength => ConnectionState::AwaitingPayload {
                    len: self.codec.read_length(stream).await?,
                },
                ConnectionState::AwaitingPayload { len } => {
                    let payload = self.codec.read_payload(stream, len).await?;
                    let batch: RequestBatch = serde_json::from_slice(&payload)?;
                    info!(players = batch.len(), bytes = len, "Batch received");
                    ConnectionState::Processing { batch }
                }
                ConnectionState::Processing { batch } => {
                    let deadline = Instant::now() + self.request_deadline;
                    ConnectionState::Responding {
                        ratings: self.aggregator.rate_batch(batch, deadline).await,
                    }
                }
                ConnectionState::Responding { ratings } => {
                    let payload = serde_json::to_vec(&ratings)?;
                    self.codec.write_frame(stream, &payload).await?;
                    written = ratings.len();
                    ConnectionState::Closed
                }
                ConnectionState::Closed => return Ok(written),
            };
        }
    }
}
