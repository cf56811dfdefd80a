//! # Derived Views
//!
//! Read-only projections computed from session state on demand.
//! Nothing here is stored: every call recomputes from the ledger, tag and
//! settings it is given.
//!
//! ```text
//! Ledger (newest-first) ──┬──► filter_transactions ──► history table
//!                         ├──► recent_transactions ──► dashboard card
//!                         └──► chronological ──► balance_series ──► chart
//!
//! FasTag + AutoRechargeSettings ──► is_low_balance / low_balance_alert
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{AutoRechargeSettings, FasTag, Transaction, TransactionKind};

// =============================================================================
// Low Balance
// =============================================================================

/// True when the balance is strictly below the configured threshold.
///
/// ```rust
/// use tollpay_core::{AutoRechargeSettings, FasTag, Money};
/// use tollpay_core::views::is_low_balance;
///
/// let settings = AutoRechargeSettings::default(); // threshold ₹300
/// let tag = FasTag::linked("1234567890123456", "MH01AB1234", Money::from_rupees(300));
/// assert!(!is_low_balance(&tag, &settings));
/// ```
pub fn is_low_balance(tag: &FasTag, settings: &AutoRechargeSettings) -> bool {
    tag.balance < settings.min_threshold
}

/// What the balance card should warn about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum LowBalanceAlert {
    /// No tag, or balance at or above the threshold.
    Clear,
    /// Balance is low and auto-recharge is switched on.
    ///
    /// Nothing actually schedules the top-up; the alert only reports that
    /// the configured policy applies.
    AutoRechargePending,
    /// Balance is low and auto-recharge is switched off.
    EnableAutoRecharge,
}

impl LowBalanceAlert {
    /// Banner text, or `None` for [`LowBalanceAlert::Clear`].
    pub fn message(&self, settings: &AutoRechargeSettings) -> Option<String> {
        let prefix = format!(
            "Your balance is below the minimum threshold of {}.",
            settings.min_threshold
        );
        match self {
            LowBalanceAlert::Clear => None,
            LowBalanceAlert::AutoRechargePending => {
                Some(format!("{} Auto-recharge will trigger soon.", prefix))
            }
            LowBalanceAlert::EnableAutoRecharge => Some(format!(
                "{} Enable auto-recharge in settings to avoid inconvenience.",
                prefix
            )),
        }
    }
}

/// Classifies the low-balance state of an optional tag.
pub fn low_balance_alert(tag: Option<&FasTag>, settings: &AutoRechargeSettings) -> LowBalanceAlert {
    match tag {
        Some(tag) if is_low_balance(tag, settings) => {
            if settings.is_enabled {
                LowBalanceAlert::AutoRechargePending
            } else {
                LowBalanceAlert::EnableAutoRecharge
            }
        }
        _ => LowBalanceAlert::Clear,
    }
}

// =============================================================================
// Transaction Filtering
// =============================================================================

/// Kind selector of the history page ("All", "Recharges", "Deductions").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Recharge,
    Deduction,
}

impl KindFilter {
    pub fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Recharge => kind == TransactionKind::Recharge,
            KindFilter::Deduction => kind == TransactionKind::Deduction,
        }
    }
}

/// Kind selector plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(default)]
    pub kind: KindFilter,
    #[serde(default)]
    pub search: String,
}

impl TransactionFilter {
    pub fn new(kind: KindFilter, search: impl Into<String>) -> Self {
        TransactionFilter {
            kind,
            search: search.into(),
        }
    }

    /// Kind membership AND (blank search OR case-insensitive match on the
    /// description OR substring of the amount's plain form).
    ///
    /// Whitespace only decides whether the search is blank. A non-blank
    /// query is matched as typed, surrounding spaces included.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if !self.kind.matches(tx.kind) {
            return false;
        }

        if self.search.trim().is_empty() {
            return true;
        }

        let query = self.search.to_lowercase();
        tx.description.to_lowercase().contains(&query) || tx.amount.to_plain_string().contains(&query)
    }
}

/// Entries accepted by `filter`, in ledger order (newest first).
///
/// ```rust
/// use tollpay_core::Ledger;
/// use tollpay_core::views::{filter_transactions, KindFilter, TransactionFilter};
///
/// let ledger = Ledger::seeded();
/// let tolls = filter_transactions(ledger.as_slice(), &TransactionFilter::new(KindFilter::Deduction, "TOLL"));
/// assert_eq!(tolls.len(), 1);
/// ```
pub fn filter_transactions<'a>(entries: &'a [Transaction], filter: &TransactionFilter) -> Vec<&'a Transaction> {
    entries.iter().filter(|tx| filter.matches(tx)).collect()
}

// =============================================================================
// Orderings
// =============================================================================

/// Entries sorted oldest first. Ties keep the order they were recorded in.
pub fn chronological(entries: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = entries.iter().rev().collect();
    sorted.sort_by_key(|tx| tx.timestamp);
    sorted
}

/// The first `limit` entries (the newest ones).
pub fn recent_transactions(entries: &[Transaction], limit: usize) -> &[Transaction] {
    &entries[..entries.len().min(limit)]
}

/// One point of the balance chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    /// Short day label, e.g. "15 Jul".
    pub label: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub balance: Money,
}

/// Balance after each entry, oldest first.
pub fn balance_series(entries: &[Transaction]) -> Vec<BalancePoint> {
    chronological(entries)
        .into_iter()
        .map(|tx| BalancePoint {
            label: tx.timestamp.format("%d %b").to_string(),
            timestamp: tx.timestamp,
            balance: tx.resulting_balance,
        })
        .collect()
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Replaces all but the last four characters with bullets.
///
/// ```rust
/// use tollpay_core::views::mask_account_number;
///
/// assert_eq!(mask_account_number("123456789"), "•••••6789");
/// assert_eq!(mask_account_number("1234"), "1234");
/// ```
pub fn mask_account_number(account_number: &str) -> String {
    let len = account_number.chars().count();
    if len <= 4 {
        return account_number.to_string();
    }
    let visible: String = account_number.chars().skip(len - 4).collect();
    format!("{}{}", "•".repeat(len - 4), visible)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::types::AutoRechargeUpdate;
    use chrono::Duration;

    fn tag_with_balance(rupees: i64) -> FasTag {
        FasTag::linked("1234567890123456", "MH01AB1234", Money::from_rupees(rupees))
    }

    fn sample_ledger() -> Ledger {
        let base = Utc::now();
        let mut ledger = Ledger::seeded();
        ledger.record(Transaction::new(
            base,
            TransactionKind::Deduction,
            Money::from_rupees(40),
            "Toll Payment - Mumbai Pune Expressway",
            Money::from_rupees(385),
        ));
        ledger.record(Transaction::new(
            base + Duration::minutes(5),
            TransactionKind::Recharge,
            Money::from_rupees(200),
            "Manual Recharge",
            Money::from_rupees(585),
        ));
        ledger
    }

    #[test]
    fn test_low_balance_is_strict() {
        let settings = AutoRechargeSettings::default();
        assert!(is_low_balance(&tag_with_balance(200), &settings));
        assert!(!is_low_balance(&tag_with_balance(300), &settings));
        assert!(!is_low_balance(&tag_with_balance(301), &settings));
    }

    #[test]
    fn test_low_balance_alert() {
        let mut settings = AutoRechargeSettings::default();
        let low = tag_with_balance(200);

        assert_eq!(low_balance_alert(None, &settings), LowBalanceAlert::Clear);
        assert_eq!(
            low_balance_alert(Some(&low), &settings),
            LowBalanceAlert::EnableAutoRecharge
        );

        settings.apply(&AutoRechargeUpdate::default().enabled(true));
        let alert = low_balance_alert(Some(&low), &settings);
        assert_eq!(alert, LowBalanceAlert::AutoRechargePending);
        assert_eq!(
            alert.message(&settings).as_deref(),
            Some("Your balance is below the minimum threshold of ₹300.00. Auto-recharge will trigger soon.")
        );
        assert_eq!(
            low_balance_alert(Some(&tag_with_balance(900)), &settings),
            LowBalanceAlert::Clear
        );
    }

    #[test]
    fn test_filter_by_kind_and_search() {
        let ledger = sample_ledger();
        let filter = TransactionFilter::new(KindFilter::Deduction, "toll");
        let found = filter_transactions(ledger.as_slice(), &filter);

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|tx| tx.is_deduction()));
        assert!(found
            .iter()
            .all(|tx| tx.description.to_lowercase().contains("toll")));
    }

    #[test]
    fn test_filter_search_matches_amount() {
        let ledger = sample_ledger();
        let found = filter_transactions(ledger.as_slice(), &TransactionFilter::new(KindFilter::All, "500"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, Money::from_rupees(500));
    }

    #[test]
    fn test_blank_filter_keeps_everything_in_order() {
        let ledger = sample_ledger();
        let found = filter_transactions(ledger.as_slice(), &TransactionFilter::new(KindFilter::All, "   "));
        let ids: Vec<_> = found.iter().map(|tx| tx.id.clone()).collect();
        let expected: Vec<_> = ledger.iter().map(|tx| tx.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_search_keeps_surrounding_spaces() {
        let ledger = sample_ledger();

        let found = filter_transactions(ledger.as_slice(), &TransactionFilter::new(KindFilter::All, " toll"));
        assert!(found.is_empty());

        let found = filter_transactions(ledger.as_slice(), &TransactionFilter::new(KindFilter::All, "- nh"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Toll Payment - NH8");
    }

    #[test]
    fn test_chronological_is_ascending() {
        let ledger = sample_ledger();
        let sorted = chronological(ledger.as_slice());
        assert!(sorted.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        // the ledger itself stays newest-first
        assert_eq!(ledger.latest().map(|tx| tx.amount), Some(Money::from_rupees(200)));
    }

    #[test]
    fn test_balance_series_labels() {
        let series = balance_series(Ledger::seeded().as_slice());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "10 Jul");
        assert_eq!(series[0].balance, Money::from_rupees(500));
        assert_eq!(series[1].label, "15 Jul");
        assert_eq!(series[1].balance, Money::from_rupees(425));
    }

    #[test]
    fn test_recent_transactions_limit() {
        let ledger = sample_ledger();
        assert_eq!(recent_transactions(ledger.as_slice(), 2).len(), 2);
        assert_eq!(recent_transactions(ledger.as_slice(), 10).len(), 4);
    }

    #[test]
    fn test_mask_account_number() {
        assert_eq!(mask_account_number("123456789012"), "••••••••9012");
        assert_eq!(mask_account_number(""), "");
    }
}
