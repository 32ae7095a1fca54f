//! HTTP client for the ledger's transactions endpoint

use super::error::FetchError;
use super::models::TransactionsResponse;
use crate::config::FetchConfig;
use anyhow::{Context, Result};
use serde_json::Value;

/// Thin wrapper over `reqwest::Client` bound to one ledger base URL
#[derive(Debug, Clone)]
pub struct TransactionsClient {
    http: reqwest::Client,
    base_url: String,
}

impl TransactionsClient {
    /// Build the client with the configured timeout
    pub fn new(base_url: impl Into<String>, fetch: &FetchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(fetch.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// URL for an identifier: the identifier is interpolated verbatim
    ///
    /// No percent-encoding and no trimming. Only a trailing slash on the base
    /// URL is dropped so it isn't doubled.
    pub fn request_url(&self, identifier: &str) -> String {
        format!(
            "{}/transactions/{}",
            self.base_url.trim_end_matches('/'),
            identifier
        )
    }

    /// GET the transactions for `identifier`
    ///
    /// Non-2xx statuses and bodies that aren't JSON are errors. An empty body is
    /// treated as `null`, which carries no transactions.
    pub async fn fetch(&self, identifier: &str) -> Result<TransactionsResponse, FetchError> {
        let url = self.request_url(identifier);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?
        };

        Ok(TransactionsResponse::new(url, status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    fn client(base: &str) -> TransactionsClient {
        TransactionsClient::new(base, &FetchConfig::default()).unwrap()
    }

    #[test]
    fn default_url_matches_original_endpoint() {
        let client = client(crate::config::DEFAULT_API_URL);
        assert_eq!(
            client.request_url(crate::config::DEFAULT_IDENTIFIER),
            "http://localhost:5000/transactions/1"
        );
    }

    #[test]
    fn identifier_is_interpolated_verbatim() {
        let client = client("http://localhost:5000");
        for id in ["42", " 42 ", "a b", "x/y", "%20", "", "ünï"] {
            assert_eq!(
                client.request_url(id),
                format!("http://localhost:5000/transactions/{}", id)
            );
        }
    }

    #[test]
    fn trailing_slash_on_base_is_not_doubled() {
        let client = client("http://localhost:5000/");
        assert_eq!(
            client.request_url("9"),
            "http://localhost:5000/transactions/9"
        );
    }

    #[tokio::test]
    async fn fetches_and_extracts_from_demo_ledger() {
        let addr = demo::spawn_local().await.unwrap();
        let client = client(&format!("http://{}", addr));

        let response = client.fetch("3").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.url, format!("http://{}/transactions/3", addr));
        assert_eq!(response.body["id"], "3");
        assert_eq!(response.transactions, demo::ledger_for("3").unwrap());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let addr = demo::spawn_local().await.unwrap();
        let client = client(&format!("http://{}", addr));

        let err = client.fetch("not-a-wallet").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.url().ends_with("/transactions/not-a-wallet"));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error_and_empty_body_is_not() {
        let router = Router::new()
            .route("/transactions/bad", get(|| async { (StatusCode::OK, "<html>") }))
            .route("/transactions/empty", get(|| async { StatusCode::OK }));
        let addr = demo::spawn_router(router).await.unwrap();
        let client = client(&format!("http://{}", addr));

        let err = client.fetch("bad").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));

        let empty = client.fetch("empty").await.unwrap();
        assert_eq!(empty.body, Value::Null);
        assert!(empty.transactions.is_empty());
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let addr = demo::unused_local_addr().await.unwrap();
        let client = client(&format!("http://{}", addr));

        let err = client.fetch("1").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(err.status(), None);
    }
}
