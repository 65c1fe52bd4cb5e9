//! Content query service
//!
//! Receives load requests from the UI thread, runs each query on the
//! blocking pool, and sends the grouped rows back. Requests are handled one
//! at a time in arrival order; there is no cancellation, so the UI discards
//! responses for screens that have since been closed.

use std::sync::Arc;
use tokio::sync::mpsc;

use mediamaster::loader::ContentLoader;
use mediamaster::store::ContentStore;
use mediamaster::utils::log_debug;
use mediamaster::{MediaCategory, MediaRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRequest {
    pub screen_id: u64,
    pub category: MediaCategory,
}

#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub screen_id: u64,
    pub category: MediaCategory,
    /// Empty when the store was unavailable or the query failed
    pub rows: Vec<MediaRow>,
}

/// Spawn the query worker
///
/// Returns (request_tx, response_rx) for communicating with the service.
pub fn spawn_query_service(
    store: Arc<dyn ContentStore>,
) -> (
    mpsc::UnboundedSender<QueryRequest>,
    mpsc::UnboundedReceiver<QueryResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<QueryRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<QueryResponse>();

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let response = run_query(store.clone(), request).await;
            if response_tx.send(response).is_err() {
                log_debug("Query service: UI receiver dropped, stopping");
                break;
            }
        }
    });

    (request_tx, response_rx)
}

async fn run_query(store: Arc<dyn ContentStore>, request: QueryRequest) -> QueryResponse {
    let QueryRequest {
        screen_id,
        category,
    } = request;
    let start = std::time::Instant::now();

    let rows = match tokio::task::spawn_blocking(move || {
        ContentLoader::new(store.as_ref()).load(category)
    })
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            log_debug(&format!("Query service: load task for {} failed: {}", category, e));
            Vec::new()
        }
    };

    log_debug(&format!(
        "Query service: screen {} {} -> {} rows in {}ms",
        screen_id,
        category,
        rows.len(),
        start.elapsed().as_millis()
    ));

    QueryResponse {
        screen_id,
        category,
        rows,
    }
}
