//! End-to-end: framed TCP client → server → Wargaming client → canned upstream.

mod support;

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use prserver::adapter::inbound::tcp::client;
use prserver::domain::{PlayerRequest, Rating, RatingFailure};
use prserver::infrastructure::bootstrap;
use prserver::infrastructure::config::settings::Config;
use prserver::port::outbound::stats::StatsSource;
use prserver::testkit::config::config;
use prserver::testkit::domain::{approx_eq, batch, reference_baseline, REFERENCE_RATING};
use prserver::testkit::source::ScriptedSource;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use support::{
    account_id, empty_stats, error_stats, hidden_stats, reference_stats, CannedHttp, Reply,
};

const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

async fn spawn_server(config: &Config, source: Arc<dyn StatsSource>) -> SocketAddr {
    let handler = bootstrap::build_handler(config, source, Arc::new(reference_baseline()));
    let server = bootstrap::bind(config, handler).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run_until(std::future::pending()));
    addr
}

fn rating_of(ratings: &[Rating], id: u64) -> Rating {
    ratings
        .iter()
        .copied()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("no rating for id {id}"))
}

#[tokio::test]
async fn rates_a_mixed_batch_through_the_wargaming_client() {
    let upstream = CannedHttp::start(|body| match account_id(body) {
        2 => Reply::ok(hidden_stats(2)),
        3 => Reply::ok(empty_stats()),
        4 => Reply::ok(error_stats()),
        id => Reply::ok(reference_stats(id)),
    })
    .await;
    let config = config(&upstream.endpoint(), &["EU", "NA"]);
    let source = bootstrap::build_source(&config).unwrap();
    let addr = spawn_server(&config, source).await;

    let requests = vec![
        PlayerRequest::new(10, "EU", 1),
        PlayerRequest::new(20, "NA", 2),
        PlayerRequest::new(30, "EU", 3),
        PlayerRequest::new(40, "EU", 4),
        PlayerRequest::new(50, "MOON", 5),
    ];
    let ratings = client::query(addr, &requests, QUERY_TIMEOUT).await.unwrap();

    assert_eq!(ratings.len(), requests.len());
    assert!(approx_eq(rating_of(&ratings, 10).rating, REFERENCE_RATING));
    assert_eq!(rating_of(&ratings, 20).failure(), Some(RatingFailure::HiddenProfile));
    assert_eq!(rating_of(&ratings, 30).failure(), Some(RatingFailure::NoData));
    assert_eq!(rating_of(&ratings, 40).failure(), Some(RatingFailure::ApiError));
    assert_eq!(rating_of(&ratings, 50).failure(), Some(RatingFailure::TransportFailure));

    // The unknown realm never reaches the upstream.
    assert_eq!(upstream.requests().len(), 4);
}

#[tokio::test]
async fn result_ids_match_request_ids() {
    let config = config("http://127.0.0.1:1/", &["EU"]);
    let addr = spawn_server(&config, Arc::new(ScriptedSource::new())).await;

    let requests = batch(40, "EU");
    let ratings = client::query(addr, &requests, QUERY_TIMEOUT).await.unwrap();

    let expected: HashSet<u64> = requests.iter().map(|r| r.id).collect();
    let got: HashSet<u64> = ratings.iter().map(|r| r.id).collect();
    assert_eq!(ratings.len(), 40);
    assert_eq!(got, expected);
    assert!(ratings.iter().all(|r| r.rating >= 0.0));
}

#[tokio::test]
async fn slow_upstream_is_cut_off_by_the_request_deadline() {
    let upstream = CannedHttp::start(|body| {
        let id = account_id(body);
        let reply = Reply::ok(reference_stats(id));
        if id == 2 {
            reply.delayed(Duration::from_secs(10))
        } else {
            reply
        }
    })
    .await;
    let mut config = config(&upstream.endpoint(), &["EU"]);
    config.upstream.timeout_ms = 30_000;
    config.server.request_deadline_ms = 500;
    let source = bootstrap::build_source(&config).unwrap();
    let addr = spawn_server(&config, source).await;

    let requests = vec![PlayerRequest::new(1, "EU", 1), PlayerRequest::new(2, "EU", 2)];
    let ratings = client::query(addr, &requests, QUERY_TIMEOUT).await.unwrap();

    assert!(approx_eq(rating_of(&ratings, 1).rating, REFERENCE_RATING));
    assert_eq!(rating_of(&ratings, 2).failure(), Some(RatingFailure::TransportFailure));
}

#[tokio::test]
async fn malformed_request_gets_no_response() {
    let config = config("http://127.0.0.1:1/", &["EU"]);
    let addr = spawn_server(&config, Arc::new(ScriptedSource::new())).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let payload = b"[{\"id\": \"nope\"}]";
    stream
        .write_all(&(payload.len() as u32).to_le_bytes())
        .await
        .unwrap();
    stream.write_all(payload).await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    assert!(reply.is_empty());
}

#[tokio::test]
async fn truncated_request_is_dropped_after_read_timeout() {
    let config = config("http://127.0.0.1:1/", &["EU"]);
    let addr = spawn_server(&config, Arc::new(ScriptedSource::new())).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(&512u32.to_le_bytes()).await.unwrap();
    stream.write_all(b"[{\"id\":1").await.unwrap();

    // testkit read timeout is 200ms; the server closes well before this.
    let mut reply = Vec::new();
    let closed = tokio::time::timeout(Duration::from_secs(3), stream.read_to_end(&mut reply)).await;

    assert!(closed.is_ok(), "server kept a stalled connection open");
    assert!(reply.is_empty());
}

#[tokio::test]
async fn serves_many_clients_at_once() {
    let config = config("http://127.0.0.1:1/", &["EU"]);
    let addr = spawn_server(&config, Arc::new(ScriptedSource::new())).await;

    let clients = (1..=8u64).map(|n| async move {
        let ratings = client::query(addr, &batch(n, "EU"), QUERY_TIMEOUT).await.unwrap();
        assert_eq!(ratings.len() as u64, n);
    });
    futures_util::future::join_all(clients).await;
}
