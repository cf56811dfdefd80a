//! # Domain Types
//!
//! Core domain types used throughout TollPay.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     FasTag      │   │   BankAccount   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  tag_id (16d)   │   │  account_number │       │
//! │  │  name, email    │   │  vehicle_number │   │  ifsc_code      │       │
//! │  │  phone          │   │  balance        │   │  bank_name      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌────────────────┐   │
//! │  │ AutoRechargeSettings │   │   Transaction   │   │TransactionKind │   │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ────────────  │   │
//! │  │  is_enabled          │   │  amount, kind   │   │  Recharge      │   │
//! │  │  min_threshold (300) │   │  description    │   │  Deduction     │   │
//! │  │  recharge_amount(500)│   │  resulting_bal. │   └────────────────┘   │
//! │  └──────────────────────┘   └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types serialize in camelCase for the dashboard and export TypeScript
//! bindings through `ts-rs`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::views::mask_account_number;
use crate::{DEFAULT_MIN_THRESHOLD, DEFAULT_RECHARGE_AMOUNT};

// =============================================================================
// User
// =============================================================================

/// The signed-in account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// FASTag
// =============================================================================

/// A toll tag linked to a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FasTag {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// 16-digit tag identifier printed on the sticker.
    pub tag_id: String,

    /// Upper-cased registration number, e.g. `MH01AB1234`.
    pub vehicle_number: String,

    /// Current prepaid balance. Never negative.
    pub balance: Money,

    pub is_linked: bool,
}

impl FasTag {
    /// Creates a freshly linked tag.
    pub fn linked(tag_id: impl Into<String>, vehicle_number: impl Into<String>, balance: Money) -> Self {
        FasTag {
            id: Uuid::new_v4().to_string(),
            tag_id: tag_id.into(),
            vehicle_number: vehicle_number.into(),
            balance,
            is_linked: true,
        }
    }
}

// =============================================================================
// Bank Account
// =============================================================================

/// The bank account auto-recharges are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    /// 9 to 18 digits.
    pub account_number: String,
    /// 11-character branch code, e.g. `SBIN0123456`.
    pub ifsc_code: String,
    pub is_linked: bool,
}

impl BankAccount {
    /// Creates a freshly linked account.
    pub fn linked(
        bank_name: impl Into<String>,
        account_number: impl Into<String>,
        ifsc_code: impl Into<String>,
    ) -> Self {
        BankAccount {
            id: Uuid::new_v4().to_string(),
            bank_name: bank_name.into(),
            account_number: account_number.into(),
            ifsc_code: ifsc_code.into(),
            is_linked: true,
        }
    }

    /// Account number with all but the last four digits hidden.
    pub fn masked_account_number(&self) -> String {
        mask_account_number(&self.account_number)
    }
}

// =============================================================================
// Auto-Recharge Settings
// =============================================================================

/// When and by how much the tag should be topped up automatically.
///
/// Only the configuration is modelled. No component acts on it yet: a low
/// balance is reported (see [`crate::views::low_balance_alert`]) but never
/// recharged automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AutoRechargeSettings {
    pub is_enabled: bool,
    pub min_threshold: Money,
    pub recharge_amount: Money,
}

impl Default for AutoRechargeSettings {
    fn default() -> Self {
        AutoRechargeSettings {
            is_enabled: false,
            min_threshold: DEFAULT_MIN_THRESHOLD,
            recharge_amount: DEFAULT_RECHARGE_AMOUNT,
        }
    }
}

impl AutoRechargeSettings {
    /// Merges the provided fields of `update`; absent fields keep their
    /// current value. Negative amounts are clamped to zero.
    pub fn apply(&mut self, update: &AutoRechargeUpdate) {
        if let Some(is_enabled) = update.is_enabled {
            self.is_enabled = is_enabled;
        }
        if let Some(min_threshold) = update.min_threshold {
            self.min_threshold = min_threshold.max(Money::zero());
        }
        if let Some(recharge_amount) = update.recharge_amount {
            self.recharge_amount = recharge_amount.max(Money::zero());
        }
    }
}

/// Partial update for [`AutoRechargeSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AutoRechargeUpdate {
    #[serde(default)]
    pub is_enabled: Option<bool>,
    #[serde(default)]
    pub min_threshold: Option<Money>,
    #[serde(default)]
    pub recharge_amount: Option<Money>,
}

impl AutoRechargeUpdate {
    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = Some(is_enabled);
        self
    }

    pub fn min_threshold(mut self, amount: Money) -> Self {
        self.min_threshold = Some(amount);
        self
    }

    pub fn recharge_amount(mut self, amount: Money) -> Self {
        self.recharge_amount = Some(amount);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.is_enabled.is_none() && self.min_threshold.is_none() && self.recharge_amount.is_none()
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// Direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money added to the tag.
    Recharge,
    /// Money taken by a toll plaza.
    Deduction,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Recharge => write!(f, "recharge"),
            TransactionKind::Deduction => write!(f, "deduction"),
        }
    }
}

/// One immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    /// Always positive; `kind` carries the direction.
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    /// Tag balance immediately after this entry was applied.
    pub resulting_balance: Money,
}

impl Transaction {
    /// Builds a transaction with a fresh id.
    pub fn new(
        timestamp: DateTime<Utc>,
        kind: TransactionKind,
        amount: Money,
        description: impl Into<String>,
        resulting_balance: Money,
    ) -> Self {
        Transaction {
            id: Uuid::new_v4().to_string(),
            timestamp,
            amount,
            kind,
            description: description.into(),
            resulting_balance,
        }
    }

    pub fn is_recharge(&self) -> bool {
        self.kind == TransactionKind::Recharge
    }

    pub fn is_deduction(&self) -> bool {
        self.kind == TransactionKind::Deduction
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_recharge_defaults() {
        let settings = AutoRechargeSettings::default();
        assert!(!settings.is_enabled);
        assert_eq!(settings.min_threshold, Money::from_rupees(300));
        assert_eq!(settings.recharge_amount, Money::from_rupees(500));
    }

    #[test]
    fn test_partial_update_changes_only_given_fields() {
        let mut settings = AutoRechargeSettings::default();
        settings.apply(&AutoRechargeUpdate::default().min_threshold(Money::from_rupees(400)));

        assert_eq!(settings.min_threshold, Money::from_rupees(400));
        assert!(!settings.is_enabled);
        assert_eq!(settings.recharge_amount, Money::from_rupees(500));
    }

    #[test]
    fn test_partial_update_clamps_negative_amounts() {
        let mut settings = AutoRechargeSettings::default();
        settings.apply(
            &AutoRechargeUpdate::default()
                .enabled(true)
                .recharge_amount(Money::from_rupees(-10)),
        );

        assert!(settings.is_enabled);
        assert_eq!(settings.recharge_amount, Money::zero());
        assert_eq!(settings.min_threshold, Money::from_rupees(300));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let update = AutoRechargeUpdate::default();
        assert!(update.is_empty());

        let mut settings = AutoRechargeSettings::default();
        settings.apply(&update);
        assert_eq!(settings, AutoRechargeSettings::default());
    }

    #[test]
    fn test_transaction_serializes_for_dashboard() {
        let tx = Transaction::new(
            Utc::now(),
            TransactionKind::Deduction,
            Money::from_rupees(75),
            "Toll Payment - NH8",
            Money::from_rupees(425),
        );
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "deduction");
        assert_eq!(json["amount"], 7_500);
        assert_eq!(json["resultingBalance"], 42_500);
        assert_eq!(json["description"], "Toll Payment - NH8");
    }

    #[test]
    fn test_partial_update_deserializes_missing_fields() {
        let update: AutoRechargeUpdate = serde_json::from_str(r#"{"minThreshold": 40000}"#).unwrap();
        assert_eq!(update.min_threshold, Some(Money::from_rupees(400)));
        assert_eq!(update.is_enabled, None);
        assert_eq!(update.recharge_amount, None);
    }

    #[test]
    fn test_bank_account_masking() {
        let account = BankAccount::linked("HDFC Bank", "123456789012", "HDFC0001234");
        assert_eq!(account.masked_account_number(), "••••••••9012");
        assert!(account.is_linked);
    }
}
