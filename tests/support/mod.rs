//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One canned reply: HTTP status, body, and a delay before answering.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Minimal HTTP/1.1 responder on a loopback port.
///
/// Every request body is recorded; the reply is chosen by `respond` from
/// the form-encoded body.
pub struct CannedHttp {
    pub addr: SocketAddr,
    pub bodies: Arc<Mutex<Vec<String>>>,
}

impl CannedHttp {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let respond = Arc::new(respond);

        let recorded = Arc::clone(&bodies);
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    return;
                };
                let respond = Arc::clone(&respond);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve(socket, respond.as_ref(), &recorded).await;
                });
            }
        });

        Self { addr, bodies }
    }

    /// Endpoint URL as configured for a realm.
    pub fn endpoint(&self) -> String {
        format!("http://{}/wows/ships/stats/", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        self.bodies.lock().clone()
    }
}

async fn serve<F>(
    mut socket: TcpStream,
    respond: &F,
    recorded: &Mutex<Vec<String>>,
) -> std::io::Result<()>
where
    F: Fn(&str) -> Reply,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[header_end..]).into_owned();
    recorded.lock().push(body.clone());

    let reply = respond(&body);
    tokio::time::sleep(reply.delay).await;

    let response = format!(
        "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

/// Account id from a form-encoded `ships/stats` body.
pub fn account_id(body: &str) -> u64 {
    body.split('&')
        .find_map(|pair| pair.strip_prefix("account_id="))
        .and_then(|value| value.parse().ok())
        .unwrap()
}

/// A successful upstream answer with the reference ship for `account_id`.
pub fn reference_stats(account_id: u64) -> String {
    format!(
        r#"{{"status":"ok","meta":{{"count":1,"hidden":null}},"data":{{"{account_id}":[{{"ship_id":100,"pvp_solo":{{"battles":100,"damage_dealt":120000,"frags":120,"wins":60}}}}]}}}}"#
    )
}

pub fn hidden_stats(account_id: u64) -> String {
    format!(r#"{{"status":"ok","meta":{{"count":1,"hidden":[{account_id}]}},"data":{{"{account_id}":null}}}}"#)
}

pub fn empty_stats() -> String {
    r#"{"status":"ok","meta":{"count":0,"hidden":null},"data":{}}"#.to_string()
}

pub fn error_stats() -> String {
    r#"{"status":"error","error":{"field":"account_id","message":"INVALID_ACCOUNT_ID","code":407,"value":"abc"}}"#.to_string()
}

/// The reference baseline as a JSON file, with one empty row.
pub fn baseline_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"time": 1700000000, "data": {{"100": {{"average_damage_dealt": 1000, "average_frags": 1, "win_rate": 55}}, "200": []}}}}"#
    )
    .unwrap();
    file
}

/// A TOML config file.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}
