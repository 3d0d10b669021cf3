// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! End-to-end tests over a real socket

use beacon_metrics::{parse_exposition, MetricsConfig, MetricsRegistry};
use beacon_server::{serve, AppState};
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::collections::BTreeSet;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Server bound to an ephemeral port, stopped on drop
struct TestServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

impl TestServer {
    async fn start() -> Self {
        let registry = MetricsRegistry::with_defaults(&MetricsConfig::default())
            .expect("Failed to build registry");
        let state = AppState::new(registry);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, state, async move {
            shutdown_rx.await.ok();
        }));

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match self.handle.take() {
            Some(handle) => handle.await.expect("Server task panicked"),
            None => Ok(()),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn metric_names(client: &Client, server: &TestServer) -> BTreeSet<String> {
    let body = client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    parse_exposition(&body)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect()
}

#[tokio::test]
async fn test_all_routes_over_http() {
    let server = TestServer::start().await;
    let client = Client::new();

    let resp = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "hello world!");

    let resp = client
        .post(server.url("/"))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Send a post request 💣");

    let resp = client.get(server.url("/metrics")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap(),
        "text/plain; version=0.0.4"
    );
    let text = resp.text().await.unwrap();
    assert!(text.lines().any(|line| line.starts_with("process_")));

    drop(client);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_consecutive_scrapes_expose_same_metrics() {
    let server = TestServer::start().await;
    let client = Client::new();

    let first = metric_names(&client, &server).await;
    let second = metric_names(&client, &server).await;
    assert!(!first.is_empty());
    assert_eq!(first, second);

    drop(client);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let server = TestServer::start().await;
    let client = Client::new();

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = if i % 2 == 0 {
            server.url("/")
        } else {
            server.url("/metrics")
        };
        async move { client.get(url).send().await.unwrap().status() }
    });

    for status in spawn_all(requests).await {
        assert_eq!(status, StatusCode::OK);
    }

    drop(client);
    server.stop().await.unwrap();
}

async fn spawn_all<F>(futures: impl Iterator<Item = F>) -> Vec<StatusCode>
where
    F: std::future::Future<Output = StatusCode> + Send + 'static,
{
    let handles: Vec<_> = futures.map(tokio::spawn).collect();
    let mut statuses = Vec::with_capacity(handles.len());
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    statuses
}

#[tokio::test]
async fn test_graceful_shutdown_returns_ok() {
    let server = TestServer::start().await;
    let addr = server.addr;
    assert!(server.stop().await.is_ok());

    // Listener is released once serve returns
    assert!(TcpListener::bind(addr).await.is_ok());
}
