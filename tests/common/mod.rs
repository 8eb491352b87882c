//! Shared helpers for probe integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mesh_probe::{ListenerSet, ProbeConfig, ResolvedConfig, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock downstream that answers every request with a fixed status and body.
///
/// Returns a counter of accepted connections.
pub async fn start_mock_backend(
    addr: SocketAddr,
    status_line: &'static str,
    body: &'static str,
) -> Arc<AtomicUsize> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    hits
}

/// Probe config with explicit role ports and identity.
pub fn config(serving: u16, health: u16, liveness: u16, id: &str) -> ProbeConfig {
    ProbeConfig {
        serving_port: serving,
        health_port: health,
        liveness_port: liveness,
        id: Some(id.to_string()),
        ..ProbeConfig::default()
    }
}

/// Run the listener set in the background and wait for it to come up.
pub async fn start_probe(config: &ResolvedConfig) -> Arc<Shutdown> {
    let shutdown = Arc::new(Shutdown::new());
    let set = ListenerSet::new(config).unwrap();

    let handle = shutdown.clone();
    tokio::spawn(async move {
        set.run(&handle).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    shutdown
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
