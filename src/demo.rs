// Demo mode: a mock ledger serving the transactions endpoint
//
// Lets the TUI run without a real backend. Any numeric wallet id has a small,
// deterministic transaction history shaped like the ledger's records
// (sender, recipient, amount, timestamp; sender "0" is a mining reward).
// Non-numeric ids are unknown wallets and get a 404.
//
// Run with: WALLET_DEMO=1 cargo run --release
//       or: cargo run --release -- serve

use crate::wallet::Transaction;
use anyhow::{Context, Result};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Router exposing `GET /transactions/:id`
pub fn router() -> Router {
    Router::new().route("/transactions/:id", get(transactions_handler))
}

async fn transactions_handler(Path(id): Path<String>) -> Response {
    match ledger_for(&id) {
        Some(transactions) => {
            tracing::debug!(id = %id, count = transactions.len(), "Demo ledger served wallet");
            Json(json!({ "id": id, "transactions": transactions })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Unknown wallet" })),
        )
            .into_response(),
    }
}

/// Deterministic history for a wallet id, `None` for ids that aren't numbers
pub fn ledger_for(id: &str) -> Option<Vec<Transaction>> {
    let wallet: u64 = id.parse().ok()?;
    let count = wallet % 4 + 1;

    let transactions = (0..count)
        .map(|i| {
            // Every wallet starts with a mining reward, then alternates direction
            let (sender, recipient) = match i {
                0 => ("0".to_string(), format!("wallet-{}", wallet)),
                i if i % 2 == 1 => (
                    format!("wallet-{}", wallet),
                    format!("wallet-{}", wallet.wrapping_add(i)),
                ),
                i => (
                    format!("wallet-{}", wallet.wrapping_add(i)),
                    format!("wallet-{}", wallet),
                ),
            };
            Transaction(json!({
                "sender": sender,
                "recipient": recipient,
                "amount": (wallet.wrapping_mul(7).wrapping_add(i * 3)) % 50 + 1,
                "timestamp": 1_700_000_000u64.wrapping_add(wallet.wrapping_mul(60)).wrapping_add(i),
            }))
        })
        .collect();

    Some(transactions)
}

/// Serve `router` on `addr` until `shutdown` resolves
pub async fn serve<F>(addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind demo ledger to {}", addr))?;

    tracing::info!("Demo ledger listening on http://{}", addr);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
        .context("Demo ledger server error")
}

/// Bind and run the demo ledger in the background
///
/// Returns the bound address (useful when `addr` has port 0).
pub async fn spawn(addr: SocketAddr) -> Result<SocketAddr> {
    spawn_router_on(addr, router()).await
}

async fn spawn_router_on(addr: SocketAddr, router: Router) -> Result<SocketAddr> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind demo ledger to {}", addr))?;
    let local = listener
        .local_addr()
        .context("Failed to read demo ledger address")?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Demo ledger stopped: {}", e);
        }
    });

    tracing::info!("Demo ledger listening on http://{}", local);
    Ok(local)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// Demo ledger on an ephemeral localhost port
#[cfg(test)]
pub async fn spawn_local() -> Result<SocketAddr> {
    spawn(SocketAddr::from(([127, 0, 0, 1], 0))).await
}

/// Arbitrary router on an ephemeral localhost port
#[cfg(test)]
pub async fn spawn_router(router: Router) -> Result<SocketAddr> {
    spawn_router_on(SocketAddr::from(([127, 0, 0, 1], 0)), router).await
}

/// A localhost address nothing listens on (connections are refused)
#[cfg(test)]
pub async fn unused_local_addr() -> Result<SocketAddr> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}
