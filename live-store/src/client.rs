use crate::error::StoreError;
use crate::query::LiveQuery;
use crate::transact::TxBatch;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::watch;

/// Pause between long-poll rounds once a response has been consumed
const POLL_PAUSE_MS: u64 = 500;
/// Base delay for the error backoff, doubled per consecutive error
const POLL_RETRY_BASE_SECS: u64 = 2;
/// Upper bound for the error backoff
const POLL_RETRY_MAX_SECS: u64 = 30;

/// Full result-set snapshot of one query: record id → record.
///
/// Records include their `id` field; the mapping key duplicates it.
pub type Snapshot = HashMap<String, Value>;

static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Shared background runtime driving all subscription poll loops
fn runtime() -> &'static tokio::runtime::Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("live-store")
            .enable_all()
            .build()
            .expect("Failed to create live-store runtime")
    })
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    q: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    cursor: String,
    #[serde(default = "default_changed")]
    changed: bool,
    #[serde(default)]
    records: Snapshot,
}

fn default_changed() -> bool {
    true
}

/// Handle to the realtime backend.
///
/// Cheap to clone; all clones multiplex over one HTTP connection pool.
#[derive(Clone)]
pub struct LiveStoreClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
}

impl LiveStoreClient {
    /// Create a new client for the given backend endpoint and application id
    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .user_agent("LiveStore/0.1.0")
            .build()
            .map_err(|e| StoreError::Network(format!("Client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            app_id: app_id.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/v1/apps/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.app_id,
            path
        )
    }

    /// Submit one atomic write batch.
    ///
    /// The backend applies all operations of the batch or none. An empty
    /// batch is a no-op and never touches the network.
    pub async fn transact(&self, batch: TxBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        log::debug!("Submitting batch {} ({} ops)", batch.batch_id, batch.len());

        let response = self
            .http
            .post(self.endpoint("transact"))
            .json(&batch)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("Transact request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StoreError::Server(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Run one query round against the backend.
    ///
    /// With a `since` cursor the backend holds the request open until the
    /// result set changes or its own timeout elapses (long poll); the reply
    /// carries `changed: false` when nothing moved.
    pub async fn query_once(
        &self,
        query: &LiveQuery,
        since: Option<&str>,
    ) -> Result<(String, Option<Snapshot>), StoreError> {
        let request = QueryRequest {
            q: query.to_wire(),
            since,
        };

        let response = self
            .http
            .post(self.endpoint("query"))
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("Query request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StoreError::Server(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        let parsed = response
            .json::<QueryResponse>()
            .await
            .map_err(|e| StoreError::Json(format!("Failed to parse query response: {}", e)))?;

        if parsed.changed {
            Ok((parsed.cursor, Some(parsed.records)))
        } else {
            Ok((parsed.cursor, None))
        }
    }

    /// Register a live subscription for a query.
    ///
    /// Returns immediately. Snapshots are delivered asynchronously through
    /// the subscription's watch channel; the first delivery is the current
    /// full result set. The loop ends when the subscription is canceled or
    /// every receiver has been dropped.
    pub fn subscribe(&self, query: LiveQuery) -> Subscription {
        let (tx, rx) = watch::channel(None::<Snapshot>);
        let canceled = Arc::new(AtomicBool::new(false));

        let client = self.clone();
        let flag = canceled.clone();

        runtime().spawn(async move {
            let mut cursor: Option<String> = None;
            let mut consecutive_errors: u32 = 0;

            while !flag.load(Ordering::SeqCst) && !tx.is_closed() {
                match client.query_once(&query, cursor.as_deref()).await {
                    Ok((next_cursor, snapshot)) => {
                        consecutive_errors = 0;
                        cursor = Some(next_cursor);

                        if let Some(snapshot) = snapshot {
                            if tx.send(Some(snapshot)).is_err() {
                                break;
                            }
                        }

                        tokio::time::sleep(Duration::from_millis(POLL_PAUSE_MS)).await;
                    }
                    Err(e) => {
                        consecutive_errors += 1;
                        log::warn!(
                            "Live query '{}' failed (attempt {}): {}",
                            query.entity_name(),
                            consecutive_errors,
                            e
                        );

                        let backoff = POLL_RETRY_BASE_SECS
                            .saturating_mul(1 << consecutive_errors.min(3))
                            .min(POLL_RETRY_MAX_SECS);
                        tokio::time::sleep(Duration::from_secs(backoff)).await;
                    }
                }
            }

            log::debug!("Subscription for '{}' ended", query.entity_name());
        });

        Subscription {
            receiver: rx,
            canceled,
        }
    }
}

/// A live registration of one query.
///
/// Cloning shares the underlying delivery channel and cancel flag. Dropping
/// every clone also ends the poll loop.
#[derive(Clone)]
pub struct Subscription {
    receiver: watch::Receiver<Option<Snapshot>>,
    canceled: Arc<AtomicBool>,
}

impl Subscription {
    /// A fresh receiver for snapshot deliveries
    pub fn receiver(&self) -> watch::Receiver<Option<Snapshot>> {
        self.receiver.clone()
    }

    /// The most recently delivered snapshot, if any arrived yet
    pub fn current(&self) -> Option<Snapshot> {
        self.receiver.borrow().clone()
    }

    /// End the subscription. Synchronous and idempotent; pending deliveries
    /// become no-ops.
    pub fn cancel(&self) {
        self.canceled.swap(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached_subscription() -> Subscription {
        let (_tx, rx) = watch::channel(None::<Snapshot>);
        Subscription {
            receiver: rx,
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let sub = detached_subscription();
        assert!(!sub.is_canceled());
        sub.cancel();
        assert!(sub.is_canceled());
        // A second cancel must be a no-op, not a panic or a state flip.
        sub.cancel();
        assert!(sub.is_canceled());
    }

    #[test]
    fn test_clones_share_cancel_state() {
        let sub = detached_subscription();
        let other = sub.clone();
        other.cancel();
        assert!(sub.is_canceled());
    }

    #[test]
    fn test_endpoint_layout() {
        let client = LiveStoreClient::new("https://live.example.com/", "app-123").unwrap();
        assert_eq!(
            client.endpoint("transact"),
            "https://live.example.com/v1/apps/app-123/transact"
        );
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        // The base URL is unroutable; an empty batch must still succeed
        // because it never leaves the client.
        let client = LiveStoreClient::new("http://127.0.0.1:1", "app").unwrap();
        client.transact(TxBatch::new()).await.unwrap();
    }

    #[test]
    fn test_query_response_defaults() {
        let parsed: QueryResponse =
            serde_json::from_str(r#"{"cursor": "c1", "records": {"r1": {"id": "r1"}}}"#).unwrap();
        assert!(parsed.changed);
        assert_eq!(parsed.records.len(), 1);

        let unchanged: QueryResponse =
            serde_json::from_str(r#"{"cursor": "c2", "changed": false}"#).unwrap();
        assert!(!unchanged.changed);
        assert!(unchanged.records.is_empty());
    }
}
