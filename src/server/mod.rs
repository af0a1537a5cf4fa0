//! The demo server behind `volley serve`.
//!
//! Answers any path with a plain-text greeting carrying a monotonically
//! increasing request counter. Exists only so the load generator has a
//! local target to exercise.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::shutdown::ShutdownReceiver;

/// Request counter owned by one `serve` invocation and passed into the
/// accept loop, rather than living as process-wide state.
#[derive(Debug, Default)]
pub struct ServerState {
    requests: Mutex<u64>,
}

impl ServerState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: Mutex::new(0),
        }
    }

    fn next_request_number(&self) -> u64 {
        self.requests.lock().map_or(0, |mut count| {
            *count = count.saturating_add(1);
            *count
        })
    }
}

/// Accept connections until `shutdown` fires.
///
/// # Errors
///
/// Returns an error if the listener's local address cannot be read.
pub async fn serve(
    listener: TcpListener,
    state: Arc<ServerState>,
    mut shutdown: ShutdownReceiver,
) -> AppResult<()> {
    let local_addr = listener.local_addr()?;
    info!("Demo server listening on http://{}", local_addr);

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _)) => {
                        let state = Arc::clone(&state);
                        tokio::spawn(async move {
                            if let Err(err) = handle_client(stream, &state).await {
                                warn!("Failed to answer connection: {}", err);
                            }
                        });
                    }
                    Err(err) => {
                        warn!("Failed to accept connection: {}", err);
                    }
                }
            }
        }
    }

    info!("Demo server stopped.");
    Ok(())
}

async fn handle_client(mut stream: TcpStream, state: &ServerState) -> std::io::Result<()> {
    let mut buffer = [0u8; 1024];
    let read = stream.read(&mut buffer).await?;
    let head = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());
    let mut parts = head.split_whitespace();
    let method = parts.next().unwrap_or("-");
    let path = parts.next().unwrap_or("-");

    let request_number = state.next_request_number();
    info!(
        "Received request {} - method: {}, path: {}",
        request_number, method, path
    );

    let body = format!(
        "Hello, this is the volley demo server. Request number: {}\n",
        request_number
    );
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
