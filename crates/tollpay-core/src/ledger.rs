//! # Ledger
//!
//! The append-only list of balance changes for the linked tag.
//!
//! ## Ordering
//! ```text
//! index 0 ──► newest entry      (what the history table shows first)
//! index n ──► oldest entry
//!
//! record(tx) inserts at index 0. Nothing is ever edited or removed.
//! Chronological (oldest-first) order is derived on demand in `views`.
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Transaction, TransactionKind};
use crate::MANUAL_RECHARGE_DESCRIPTION;

/// Newest-first transaction ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger { entries: Vec::new() }
    }

    /// The demo history every new session starts with.
    ///
    /// ```text
    /// 15 Jul 2023  deduction  ₹75   "Toll Payment - NH8"  → ₹425
    /// 10 Jul 2023  recharge   ₹500  "Manual Recharge"     → ₹500
    /// ```
    pub fn seeded() -> Self {
        Ledger {
            entries: vec![
                Transaction {
                    id: "1".to_string(),
                    timestamp: seed_date(2023, 7, 15),
                    amount: Money::from_rupees(75),
                    kind: TransactionKind::Deduction,
                    description: "Toll Payment - NH8".to_string(),
                    resulting_balance: Money::from_rupees(425),
                },
                Transaction {
                    id: "2".to_string(),
                    timestamp: seed_date(2023, 7, 10),
                    amount: Money::from_rupees(500),
                    kind: TransactionKind::Recharge,
                    description: MANUAL_RECHARGE_DESCRIPTION.to_string(),
                    resulting_balance: Money::from_rupees(500),
                },
            ],
        }
    }

    /// Builds a ledger from entries already ordered newest-first.
    pub fn from_newest_first(entries: Vec<Transaction>) -> Self {
        Ledger { entries }
    }

    /// Prepends `transaction`, making it the newest entry.
    pub fn record(&mut self, transaction: Transaction) {
        self.entries.insert(0, transaction);
    }

    /// The newest entry.
    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.first()
    }

    /// Balance after the newest entry.
    pub fn latest_balance(&self) -> Option<Money> {
        self.latest().map(|tx| tx.resulting_balance)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, newest first.
    pub fn as_slice(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_ledger_is_newest_first() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.as_slice()[0].timestamp > ledger.as_slice()[1].timestamp);
        assert_eq!(ledger.latest_balance(), Some(Money::from_rupees(425)));
    }

    #[test]
    fn test_record_prepends() {
        let mut ledger = Ledger::seeded();
        let tx = Transaction::new(
            Utc::now(),
            TransactionKind::Recharge,
            Money::from_rupees(500),
            MANUAL_RECHARGE_DESCRIPTION,
            Money::from_rupees(925),
        );
        let id = tx.id.clone();

        ledger.record(tx);

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.latest().map(|t| t.id.as_str()), Some(id.as_str()));
        assert_eq!(ledger.latest_balance(), Some(Money::from_rupees(925)));
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.latest_balance(), None);
    }
}
