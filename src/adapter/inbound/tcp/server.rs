//! TCP accept loop.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::Semaphore;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::connection::ConnectionHandler;
use crate::error::Result;

/// Back-off after a failed `accept`, e.g. when the process is out of
/// file descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections and serves each one on its own task.
pub struct Server {
    listener: TcpListener,
    handler: Arc<ConnectionHandler>,
    connections: Option<Arc<Semaphore>>,
}

impl Server {
    /// Bind the listening socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind<A: ToSocketAddrs>(addr: A, handler: Arc<ConnectionHandler>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            handler,
            connections: None,
        })
    }

    /// Cap simultaneously served connections. Further clients wait in the
    /// accept backlog.
    #[must_use]
    pub fn with_max_connections(mut self, limit: Option<usize>) -> Self {
        self.connections = limit.map(|limit| Arc::new(Semaphore::new(limit.max(1))));
        self
    }

    /// Address actually bound, useful when binding port 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot report its address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves. Connections already accepted run to
    /// completion on their own tasks.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let permit = match &self.connections {
                Some(gate) => tokio::select! {
                    () = &mut shutdown => break,
                    permit = Arc::clone(gate).acquire_owned() => match permit {
                        Ok(permit) => Some(permit),
                        Err(_) => break,
                    },
                },
                None => None,
            };

            let (stream, peer) = tokio::select! {
                () = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        warn!(error = %err, "Accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    }
                },
            };

            if let Err(err) = stream.set_nodelay(true) {
                debug!(error = %err, "Could not disable Nagle");
            }

            let handler = Arc::clone(&self.handler);
            let span = info_span!("connection", id = %Uuid::new_v4(), peer = %peer);
            tokio::spawn(
                async move {
                    debug!("Accepted");
                    handler.handle(stream).await;
                    drop(permit);
                }
                .instrument(span),
            );
        }

        info!("Listener stopped");
    }
}
