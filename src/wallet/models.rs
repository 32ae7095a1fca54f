//! Response models for the transactions endpoint
//!
//! The ledger does not commit to a record shape, so a transaction is kept as the
//! raw JSON element and only summarized for display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One transaction record, exactly as the server sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(pub Value);

impl Transaction {
    /// Look up a top-level string-ish field (`sender`, `recipient`, ...)
    fn text_field(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// One-line summary for the transactions list
    ///
    /// Uses the ledger's `sender`/`recipient` fields when present and falls back
    /// to compact JSON. The amount is deliberately left out.
    pub fn summary(&self) -> String {
        match (self.text_field("sender"), self.text_field("recipient")) {
            (Some(sender), Some(recipient)) => format!("{} → {}", sender, recipient),
            (Some(sender), None) => format!("from {}", sender),
            (None, Some(recipient)) => format!("to {}", recipient),
            (None, None) => self.0.to_string(),
        }
    }
}

/// A successful response from `GET {api_url}/transactions/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsResponse {
    /// The URL the request was sent to
    pub url: String,
    /// HTTP status code (always 2xx here)
    pub status: u16,
    /// Full decoded body
    pub body: Value,
    /// Records extracted from the body
    pub transactions: Vec<Transaction>,
}

impl TransactionsResponse {
    pub fn new(url: String, status: u16, body: Value) -> Self {
        let transactions = extract_transactions(&body);
        Self {
            url,
            status,
            body,
            transactions,
        }
    }
}

/// Pull the transaction list out of a response body
///
/// A bare array is the list itself; an object contributes its `transactions`
/// array. Any other shape has no transactions.
pub fn extract_transactions(body: &Value) -> Vec<Transaction> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("transactions") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items.iter().cloned().map(Transaction).collect()
}
