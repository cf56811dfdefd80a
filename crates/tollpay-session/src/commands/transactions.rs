//! # Transaction Commands
//!
//! History table, recent activity and the balance chart. All three are
//! recomputed from the ledger on every call.

use serde::Serialize;
use tracing::debug;

use tollpay_core::views::{self, BalancePoint, TransactionFilter};
use tollpay_core::{Transaction, RECENT_TRANSACTIONS_LIMIT};

use crate::state::FasTagState;

/// Filtered history, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
    /// Ledger size before filtering.
    pub total: usize,
}

pub async fn list_transactions(fastag: &FasTagState, filter: &TransactionFilter) -> TransactionListResponse {
    debug!(kind = ?filter.kind, search = %filter.search, "list_transactions command");

    let ledger = fastag.transactions().await;
    TransactionListResponse {
        transactions: views::filter_transactions(ledger.as_slice(), filter)
            .into_iter()
            .cloned()
            .collect(),
        total: ledger.len(),
    }
}

/// Newest entries for the dashboard card. `limit` defaults to five.
pub async fn get_recent_transactions(fastag: &FasTagState, limit: Option<usize>) -> Vec<Transaction> {
    let limit = limit.unwrap_or(RECENT_TRANSACTIONS_LIMIT);
    debug!(limit, "get_recent_transactions command");

    let ledger = fastag.transactions().await;
    views::recent_transactions(ledger.as_slice(), limit).to_vec()
}

/// Balance after every entry, oldest first.
pub async fn get_balance_chart(fastag: &FasTagState) -> Vec<BalancePoint> {
    debug!("get_balance_chart command");
    views::balance_series(fastag.transactions().await.as_slice())
}
