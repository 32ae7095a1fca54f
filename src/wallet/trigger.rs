//! Fetch trigger: turns UI events into transaction requests
//!
//! Requests are fired by explicit events only (mount, submit, edit). Edits are
//! debounced. Firing always aborts the previous request task, whether it is
//! still waiting out its debounce or already talking to the server, so at most
//! one request per trigger is live.
//!
//! ```text
//! fire(id, reason)
//!    │  abort previous task, generation += 1
//!    ▼
//! spawned task: [sleep debounce] → GET /transactions/{id} → log once → send outcome
//!    │
//!    ▼
//! mpsc::Receiver<FetchOutcome> → WalletState::apply (stale generations dropped)
//! ```

use super::client::TransactionsClient;
use super::error::FetchError;
use super::models::TransactionsResponse;
use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Why a request is being fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireReason {
    /// First render of the form
    Mount,
    /// Enter in the form or an explicit refresh
    Submit,
    /// Identifier edited; waits out the debounce
    Edit,
}

impl FireReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FireReason::Mount => "mount",
            FireReason::Submit => "submit",
            FireReason::Edit => "edit",
        }
    }
}

/// A settled request
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    /// Identifier captured when the request was fired
    pub identifier: String,
    pub result: Result<TransactionsResponse, FetchError>,
}

/// Request counters for the status bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerStats {
    pub issued: u64,
    pub superseded: u64,
}

pub struct FetchTrigger {
    client: Arc<TransactionsClient>,
    debounce: Duration,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    stats: TriggerStats,
}

impl FetchTrigger {
    pub fn new(
        client: TransactionsClient,
        debounce: Duration,
        outcome_tx: mpsc::Sender<FetchOutcome>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            debounce,
            outcome_tx,
            generation: 0,
            in_flight: None,
            stats: TriggerStats::default(),
        }
    }

    pub fn client(&self) -> &TransactionsClient {
        &self.client
    }

    pub fn stats(&self) -> TriggerStats {
        self.stats
    }

    /// Fire a request for `identifier`, superseding any previous one
    ///
    /// Must be called from within a tokio runtime. Returns the new generation.
    pub fn fire(&mut self, identifier: &str, reason: FireReason) -> u64 {
        self.cancel();

        self.generation += 1;
        self.stats.issued += 1;

        let generation = self.generation;
        let identifier = identifier.to_string();
        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        let delay = match reason {
            FireReason::Edit => self.debounce,
            FireReason::Mount | FireReason::Submit => Duration::ZERO,
        };

        tracing::trace!(
            generation,
            reason = reason.as_str(),
            url = %client.request_url(&identifier),
            "Request scheduled"
        );

        self.in_flight = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let result = client.fetch(&identifier).await;
            log_outcome(&identifier, &result);

            // Receiver gone means the UI is shutting down
            let _ = tx
                .send(FetchOutcome {
                    generation,
                    identifier,
                    result,
                })
                .await;
        }));

        generation
    }

    /// Abort the outstanding request, if any. Returns whether one was aborted.
    pub fn cancel(&mut self) -> bool {
        let Some(handle) = self.in_flight.take() else {
            return false;
        };

        if handle.is_finished() {
            return false;
        }

        handle.abort();
        self.stats.superseded += 1;
        tracing::debug!(generation = self.generation, "Superseded request cancelled");
        true
    }
}

impl Drop for FetchTrigger {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Report a settled request on the diagnostic channel, exactly once
pub fn log_outcome(identifier: &str, result: &Result<TransactionsResponse, FetchError>) {
    match result {
        Ok(response) => tracing::info!(
            identifier,
            url = %response.url,
            status = response.status,
            transactions = response.transactions.len(),
            body = %response.body,
            "Fetched transactions"
        ),
        Err(err) => tracing::error!(
            identifier,
            url = %err.url(),
            status = ?err.status(),
            error = %error_chain(err),
            "Transaction request failed"
        ),
    }
}

/// Render an error with its sources, e.g. "request ...: error sending request: Connection refused"
fn error_chain(err: &FetchError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::demo;
    use crate::logging::{LogBuffer, LogLevel, TuiLogLayer};
    use crate::wallet::state::{Applied, WalletState};
    use axum::extract::{Path, State};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Mutex;
    use tracing_subscriber::layer::SubscriberExt;

    const WAIT: Duration = Duration::from_secs(5);

    fn trigger_for(base: String, debounce: Duration) -> (FetchTrigger, mpsc::Receiver<FetchOutcome>) {
        let (tx, rx) = mpsc::channel(16);
        let client = TransactionsClient::new(base, &FetchConfig::default()).unwrap();
        (FetchTrigger::new(client, debounce, tx), rx)
    }

    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));
        let guard = tracing::subscriber::set_default(subscriber);
        (buffer, guard)
    }

    async fn next(rx: &mut mpsc::Receiver<FetchOutcome>) -> FetchOutcome {
        tokio::time::timeout(WAIT, rx.recv())
            .await
            .expect("outcome in time")
            .expect("channel open")
    }

    type Hits = Arc<Mutex<Vec<String>>>;

    /// Ledger that records every path it serves; id "slow" answers after a delay
    async fn recording_ledger() -> (String, Hits) {
        let hits: Hits = Arc::default();
        let router = Router::new()
            .route(
                "/transactions/:id",
                get(|State(hits): State<Hits>, Path(id): Path<String>| async move {
                    hits.lock().unwrap().push(id.clone());
                    if id == "slow" {
                        tokio::time::sleep(Duration::from_millis(300)).await;
                    }
                    Json(json!({"id": id, "transactions": [{"sender": id}]}))
                }),
            )
            .with_state(Arc::clone(&hits));
        let addr = demo::spawn_router(router).await.unwrap();
        (format!("http://{}", addr), hits)
    }

    #[tokio::test]
    async fn success_logs_body_once_and_populates_state() {
        let (logs, _guard) = capture_logs();
        let addr = demo::spawn_local().await.unwrap();
        let (mut trigger, mut rx) = trigger_for(format!("http://{}", addr), Duration::ZERO);
        let mut state = WalletState::new("1");

        let generation = trigger.fire(state.identifier(), FireReason::Mount);
        state.begin_request(generation);
        let outcome = next(&mut rx).await;

        let body = outcome.result.as_ref().unwrap().body.to_string();
        let matching: Vec<_> = logs
            .get_all()
            .into_iter()
            .filter(|e| e.contains(&body))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].level, LogLevel::Info);
        assert_eq!(matching[0].field("identifier"), Some("1"));

        assert_eq!(state.apply(outcome), Applied::Updated);
        assert_eq!(state.transactions(), demo::ledger_for("1").unwrap().as_slice());
    }

    #[tokio::test]
    async fn failure_logs_error_once_and_does_not_panic() {
        let (logs, _guard) = capture_logs();
        let addr = demo::unused_local_addr().await.unwrap();
        let base = format!("http://{}", addr);
        let (mut trigger, mut rx) = trigger_for(base.clone(), Duration::ZERO);
        let mut state = WalletState::new("1");

        let generation = trigger.fire("1", FireReason::Submit);
        state.begin_request(generation);
        let outcome = next(&mut rx).await;
        assert!(outcome.result.is_err());

        let url = format!("{}/transactions/1", base);
        let errors: Vec<_> = logs
            .get_all()
            .into_iter()
            .filter(|e| e.level == LogLevel::Error && e.contains(&url))
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field("error").is_some());

        assert_eq!(state.apply(outcome), Applied::Failed);
        assert!(state.transactions().is_empty());
    }

    #[tokio::test]
    async fn http_failure_logs_status() {
        let (logs, _guard) = capture_logs();
        let addr = demo::spawn_local().await.unwrap();
        let (mut trigger, mut rx) = trigger_for(format!("http://{}", addr), Duration::ZERO);

        trigger.fire("nope", FireReason::Submit);
        assert!(next(&mut rx).await.result.is_err());

        let errors: Vec<_> = logs
            .get_all()
            .into_iter()
            .filter(|e| e.level == LogLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field("status"), Some("Some(404)"));
        assert_eq!(errors[0].field("identifier"), Some("nope"));
    }

    #[tokio::test]
    async fn typing_issues_new_request_while_first_is_in_flight() {
        let (base, hits) = recording_ledger().await;
        let (mut trigger, mut rx) = trigger_for(base, Duration::from_millis(20));
        let mut state = WalletState::new("slow");

        let first = trigger.fire(state.identifier(), FireReason::Mount);
        state.begin_request(first);

        // Give the first request time to reach the server
        tokio::time::sleep(Duration::from_millis(100)).await;

        state.set_identifier("42");
        assert_eq!(state.identifier(), "42");
        let second = trigger.fire(state.identifier(), FireReason::Edit);
        state.begin_request(second);

        let outcome = next(&mut rx).await;
        assert_eq!(outcome.generation, second);
        assert_eq!(outcome.identifier, "42");
        assert_eq!(state.apply(outcome), Applied::Updated);

        let hits = hits.lock().unwrap().clone();
        assert_eq!(hits, vec!["slow".to_string(), "42".to_string()]);
        assert_eq!(trigger.stats().superseded, 1);
    }

    #[tokio::test]
    async fn rapid_edits_collapse_into_one_request() {
        let (base, hits) = recording_ledger().await;
        let (mut trigger, mut rx) = trigger_for(base, Duration::from_millis(150));

        for id in ["4", "42", "421"] {
            trigger.fire(id, FireReason::Edit);
        }

        let outcome = next(&mut rx).await;
        assert_eq!(outcome.identifier, "421");
        assert_eq!(outcome.generation, 3);

        // Nothing else settles
        let extra = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(extra.is_err());
        assert_eq!(*hits.lock().unwrap(), vec!["421".to_string()]);

        let stats = trigger.stats();
        assert_eq!(stats.issued, 3);
        assert_eq!(stats.superseded, 2);
    }

    #[tokio::test]
    async fn identifier_is_captured_at_fire_time() {
        let (base, _hits) = recording_ledger().await;
        let (mut trigger, mut rx) = trigger_for(base, Duration::ZERO);
        let mut state = WalletState::new("7");

        trigger.fire(state.identifier(), FireReason::Submit);
        // Changing state afterwards must not leak into the request
        state.set_identifier("8");

        let outcome = next(&mut rx).await;
        assert_eq!(outcome.identifier, "7");
        assert!(outcome.result.unwrap().url.ends_with("/transactions/7"));
    }
}
