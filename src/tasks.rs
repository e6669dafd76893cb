//! Async task management for non-blocking API operations.
//!
//! Fetches run in background tasks so the UI keeps drawing while a page
//! loads. Results come back to the main loop over a tokio channel.
//!
//! # Architecture
//!
//! 1. `App` records a pending fetch when the page changes
//! 2. The main loop takes it with `App::take_pending_fetch` and spawns it via
//!    `TaskSpawner`
//! 3. The main loop keeps rendering and handling events
//! 4. When the task completes, it sends an `ApiMessage` through the channel
//! 5. The main loop polls the channel with `try_recv()` and hands the message
//!    to `App::handle_api_message`
//!
//! Nothing is cancelled. Every request carries the token it was issued with
//! so `App` can drop responses that a newer navigation has superseded.

use tokio::sync::mpsc;
use tracing::{debug, warn, Instrument};

use crate::api::types::ArtworkPage;
use crate::api::ArticClient;
use crate::logging::{fetch_span, FETCH_TARGET};

/// A page fetch that `App` wants performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonically increasing request token.
    pub request_id: u64,
    /// The 1-based page to fetch.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// A page of artworks arrived, or the fetch failed.
    ArtworksFetched {
        request_id: u64,
        page: u32,
        result: Result<ArtworkPage, String>,
    },
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to fetch one page of artworks.
    pub fn spawn_fetch_artworks(&self, client: &ArticClient, request: FetchRequest) {
        let tx = self.tx.clone();
        let client = client.clone();
        let span = fetch_span(request.request_id, request.page);
        tokio::spawn(
            async move {
                debug!(target: FETCH_TARGET, limit = request.limit, "Fetch started");
                let result = client
                    .fetch_artworks(request.page, request.limit)
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            warn!(target: FETCH_TARGET, "Artworks request timed out");
                        }
                        e.to_string()
                    });
                debug!(target: FETCH_TARGET, ok = result.is_ok(), "Fetch finished");
                let _ = tx.send(ApiMessage::ArtworksFetched {
                    request_id: request.request_id,
                    page: request.page,
                    result,
                });
            }
            .instrument(span),
        );
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_failed_fetch_reports_through_channel() {
        // Reserve a port, then free it so the connection is refused
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            ArticClient::with_timeout(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let (mut rx, spawner) = create_task_channel();

        spawner.spawn_fetch_artworks(
            &client,
            FetchRequest {
                request_id: 7,
                page: 2,
                limit: 10,
            },
        );

        match rx.recv().await {
            Some(ApiMessage::ArtworksFetched {
                request_id,
                page,
                result,
            }) => {
                assert_eq!(request_id, 7);
                assert_eq!(page, 2);
                assert!(result.is_err());
            }
            None => panic!("channel closed without a message"),
        }
    }
}
