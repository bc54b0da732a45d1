//! Integration tests for graceful shutdown of the HTTP server

use genosentinel::adapters::clinical::ClinicalDataAdapter;
use genosentinel::adapters::memory::MemoryStore;
use genosentinel::api::{serve, AppState};
use genosentinel::config::ServerConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), ClinicalDataAdapter::pending())
}

fn ephemeral_server() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_shutdown_signal_propagation() {
    let (shutdown_tx, shutdown_rx1) = watch::channel(false);
    let shutdown_rx2 = shutdown_rx1.clone();

    assert!(!*shutdown_rx1.borrow());
    assert!(!*shutdown_rx2.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*shutdown_rx1.borrow());
    assert!(*shutdown_rx2.borrow());
}

#[tokio::test]
async fn test_server_stops_on_signal() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let config = ephemeral_server();

    let handle = tokio::spawn(async move { serve(&config, state(), shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown_tx.send(true).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop within the timeout")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_server_stops_when_sender_dropped() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let config = ephemeral_server();

    let handle = tokio::spawn(async move { serve(&config, state(), shutdown_rx).await });
    drop(shutdown_tx);

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop within the timeout")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let config = ServerConfig {
        port: taken.local_addr().unwrap().port(),
        ..ephemeral_server()
    };

    let result = serve(&config, state(), shutdown_rx).await;
    assert!(result.is_err());
}
