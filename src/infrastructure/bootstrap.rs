//! Composition root: turns a validated [`Config`] into a running server.

use std::future::Future;
use std::sync::Arc;

use tracing::info;

use crate::adapter::inbound::tcp::connection::ConnectionHandler;
use crate::adapter::inbound::tcp::frame::FrameCodec;
use crate::adapter::inbound::tcp::server::Server;
use crate::adapter::outbound::wargaming::WargamingClient;
use crate::application::{BatchAggregator, StatsFetcher};
use crate::domain::Baseline;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::limiter::RateLimiter;
use crate::port::outbound::stats::StatsSource;

/// Load the expected-values dataset named by the config.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_baseline(config: &Config) -> Result<Arc<Baseline>> {
    let baseline = Baseline::load(&config.baseline.path)?;
    info!(
        path = %config.baseline.path.display(),
        ships = baseline.len(),
        generated_at = ?baseline.generated_at(),
        "Baseline loaded"
    );
    Ok(Arc::new(baseline))
}

/// Build the Wargaming-backed stats source.
///
/// # Errors
///
/// Returns an error if no application id is configured.
pub fn build_source(config: &Config) -> Result<Arc<dyn StatsSource>> {
    let application_id = config.application_id()?;
    let client = WargamingClient::from_config(&config.upstream, application_id);
    info!(
        realms = ?config.upstream.realms.keys().collect::<Vec<_>>(),
        "Statistics client ready"
    );
    Ok(Arc::new(client))
}

/// Wire limiter, fetcher and aggregator into a connection handler.
#[must_use]
pub fn build_handler(
    config: &Config,
    source: Arc<dyn StatsSource>,
    baseline: Arc<Baseline>,
) -> Arc<ConnectionHandler> {
    let limiter = Arc::new(RateLimiter::per_second(config.upstream.rate_limit));
    let fetcher = Arc::new(StatsFetcher::new(source, limiter, baseline));
    let aggregator = BatchAggregator::new(fetcher).with_max_in_flight(config.upstream.in_flight_limit());
    let codec = FrameCodec::new(config.server.max_frame_bytes, config.server.read_timeout());

    Arc::new(ConnectionHandler::new(
        Arc::new(aggregator),
        codec,
        config.server.request_deadline(),
    ))
}

/// Bind the listener for `handler` on the configured address.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn bind(config: &Config, handler: Arc<ConnectionHandler>) -> Result<Server> {
    let server = Server::bind(config.server.addr(), handler)
        .await?
        .with_max_connections(config.server.connection_limit());
    info!(
        addr = %server.local_addr()?,
        rate_limit = config.upstream.rate_limit,
        max_connections = ?config.server.connection_limit(),
        max_in_flight = ?config.upstream.in_flight_limit(),
        "Listening"
    );
    Ok(server)
}

/// Load everything, bind, and serve until `shutdown` resolves.
///
/// Every startup failure surfaces here, before the first accept.
///
/// # Errors
///
/// Returns an error if the baseline, the application id, or the listener
/// cannot be set up.
pub async fn run<F>(config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let baseline = load_baseline(config)?;
    let source = build_source(config)?;
    let server = bind(config, build_handler(config, source, baseline)).await?;

    server.run_until(shutdown).await;
    Ok(())
}
