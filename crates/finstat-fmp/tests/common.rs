#![allow(dead_code)]

use finstat_fmp::{Backoff, FmpCollector, RetryPolicy};
use httpmock::{Method::GET, Mock, MockServer};
use reqwest::Url;
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

pub const API_KEY: &str = "itest0123456789abcdefXYZ";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Backoff::Fixed(Duration::from_millis(10)))
}

pub fn collector_for(server: &MockServer) -> FmpCollector {
    FmpCollector::builder()
        .api_key(API_KEY)
        .base_url(Url::parse(&server.url("/api/v3/")).unwrap())
        .retry_policy(fast_retry())
        .build()
        .unwrap()
}

pub fn mock_statement<'a>(
    server: &'a MockServer,
    segment: &str,
    ticker: &str,
    status: u16,
    body: &str,
) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v3/{segment}/{ticker}"))
            .query_param("apikey", API_KEY);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// A bare HTTP upstream that never answers the first `stall` connections and
/// serves `body` with status 200 on every later one.
#[derive(Debug)]
pub struct StallingUpstream {
    pub base_url: Url,
    connections: Arc<AtomicUsize>,
}

impl StallingUpstream {
    pub async fn start(stall: usize, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&connections);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let seen = counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    let mut buf = [0_u8; 4096];
                    let mut head = Vec::new();
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        let read = socket.read(&mut buf).await.unwrap_or(0);
                        if read == 0 {
                            return;
                        }
                        head.extend_from_slice(&buf[..read]);
                    }

                    if seen < stall {
                        // Hold the connection until the client gives up.
                        while socket.read(&mut buf).await.unwrap_or(0) > 0 {}
                        return;
                    }

                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/api/v3/")).unwrap(),
            connections,
        }
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}
