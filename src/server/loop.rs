// Server loop module
// Accepts connections until shutdown, then drains in-flight ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::spawn_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;

/// Poll interval while waiting for connections to finish
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` fires.
///
/// Once shutdown is requested the listener is closed and connections still
/// in flight get up to `grace` to finish. Returns how many were still open
/// when the grace period ran out.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
    grace: Duration,
) -> usize {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&state),
                            Arc::clone(&active_connections),
                        );
                    }
                    Err(e) => {
                        eprintln!("[ERROR] Failed to accept connection: {e}");
                    }
                }
            }

            () = shutdown.wait() => {
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&active_connections, grace).await
}

/// Wait for the active connection count to reach zero, at most `grace`
async fn drain_connections(active: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 || tokio::time::Instant::now() >= deadline {
            return remaining;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::tests::MemoryDestination;
    use crate::logger::{Dispatcher, LevelSet};
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let sink = MemoryDestination::named("memory");
        let dispatcher = Dispatcher::builder()
            .register(sink.clone(), LevelSet::ALL)
            .build();
        let state = Arc::new(AppState::new(Arc::new(dispatcher)));

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());

        let server = tokio::spawn(start_server_loop(
            listener,
            state,
            Arc::clone(&shutdown),
            Duration::from_secs(1),
        ));

        let response = http_get(addr, "/simulate/503").await;
        assert!(response.starts_with("HTTP/1.1 503 Service Unavailable"));
        assert!(response.ends_with("Server error. [GET /simulate/503] 503 Service Unavailable\n"));

        let response = http_get(addr, "/simulate/%35%30%34").await;
        assert!(response.starts_with("HTTP/1.1 504 Gateway Timeout"));

        let response = http_get(addr, "/").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("Please enter a valid status code"));

        assert_eq!(sink.lines().len(), 2);

        shutdown.trigger();
        let remaining = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server loop should stop")
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace() {
        let active = AtomicUsize::new(2);
        let remaining = drain_connections(&active, Duration::from_millis(10)).await;
        assert_eq!(remaining, 2);
    }
}
