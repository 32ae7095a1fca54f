// Wallet module - identifier state and the transactions request path
//
// - client: builds `{api_url}/transactions/{id}` and performs the GET
// - trigger: fires requests on mount/submit/edit, cancels superseded ones
// - state: identifier + transaction list, updated only from the latest outcome
// - models/error: response records and the single "request failed" error

pub mod client;
pub mod error;
pub mod models;
pub mod state;
pub mod trigger;

pub use client::TransactionsClient;
pub use error::FetchError;
pub use models::{Transaction, TransactionsResponse};
pub use state::{Applied, WalletState};
pub use trigger::{log_outcome, FetchOutcome, FetchTrigger, FireReason, TriggerStats};
