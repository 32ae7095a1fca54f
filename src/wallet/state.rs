//! Wallet state: the identifier being edited and the transactions on screen
//!
//! The view renders only from this struct. Outcomes are applied here and
//! nowhere else, so the list always belongs to the latest issued request.

use super::models::Transaction;
use super::trigger::FetchOutcome;

/// What applying an outcome did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Outcome belonged to a superseded request and was dropped
    Stale,
    /// Transaction list replaced with the response's records
    Updated,
    /// Latest request failed; list cleared
    Failed,
}

#[derive(Debug, Clone)]
pub struct WalletState {
    identifier: String,
    transactions: Vec<Transaction>,
    /// Generation of the most recently issued request (0 = none yet)
    latest: u64,
    /// Whether the latest request is still outstanding
    pending: bool,
}

impl WalletState {
    pub fn new(initial_identifier: impl Into<String>) -> Self {
        Self {
            identifier: initial_identifier.into(),
            transactions: Vec::new(),
            latest: 0,
            pending: false,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Replace the identifier with the field's raw text
    ///
    /// Returns whether the value actually changed.
    pub fn set_identifier(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if raw == self.identifier {
            return false;
        }
        self.identifier = raw;
        true
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record that request `generation` was issued; older outcomes become stale
    pub fn begin_request(&mut self, generation: u64) {
        self.latest = self.latest.max(generation);
        self.pending = true;
    }

    /// Apply a settled request
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        if outcome.generation != self.latest {
            return Applied::Stale;
        }

        self.pending = false;
        match outcome.result {
            Ok(response) => {
                self.transactions = response.transactions;
                Applied::Updated
            }
            Err(_) => {
                self.transactions.clear();
                Applied::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::error::FetchError;
    use crate::wallet::models::TransactionsResponse;
    use serde_json::json;

    fn success(generation: u64, identifier: &str, body: serde_json::Value) -> FetchOutcome {
        FetchOutcome {
            generation,
            identifier: identifier.to_string(),
            result: Ok(TransactionsResponse::new(
                format!("http://localhost:5000/transactions/{}", identifier),
                200,
                body,
            )),
        }
    }

    fn failure(generation: u64, identifier: &str) -> FetchOutcome {
        FetchOutcome {
            generation,
            identifier: identifier.to_string(),
            result: Err(FetchError::Status {
                url: format!("http://localhost:5000/transactions/{}", identifier),
                status: 500,
            }),
        }
    }

    #[test]
    fn identifier_is_replaced_verbatim() {
        let mut state = WalletState::new("1");
        for raw in ["42", "  spaced  ", "", "0x1F", "ünïcödé", "a\tb"] {
            state.set_identifier(raw);
            assert_eq!(state.identifier(), raw);
        }
    }

    #[test]
    fn set_identifier_reports_change() {
        let mut state = WalletState::new("1");
        assert!(!state.set_identifier("1"));
        assert!(state.set_identifier("12"));
    }

    #[test]
    fn success_replaces_transactions() {
        let mut state = WalletState::new("1");
        state.begin_request(1);
        assert!(state.is_pending());

        let applied = state.apply(success(1, "1", json!({"transactions": [{"sender": "a"}]})));
        assert_eq!(applied, Applied::Updated);
        assert_eq!(state.transactions().len(), 1);
        assert!(!state.is_pending());
    }

    #[test]
    fn failure_clears_transactions() {
        let mut state = WalletState::new("1");
        state.begin_request(1);
        state.apply(success(1, "1", json!([{"sender": "a"}])));

        state.begin_request(2);
        assert_eq!(state.apply(failure(2, "1")), Applied::Failed);
        assert!(state.transactions().is_empty());
    }

    #[test]
    fn stale_outcome_never_updates() {
        let mut state = WalletState::new("1");
        state.begin_request(1);
        state.set_identifier("42");
        state.begin_request(2);

        // The first request settles late
        let applied = state.apply(success(1, "1", json!([{"sender": "old"}])));
        assert_eq!(applied, Applied::Stale);
        assert!(state.transactions().is_empty());
        assert!(state.is_pending());

        let applied = state.apply(success(2, "42", json!([{"sender": "new"}])));
        assert_eq!(applied, Applied::Updated);
        assert_eq!(state.transactions()[0].summary(), "from new");
    }
}
