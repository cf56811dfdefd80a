//! # FASTag State
//!
//! The session's tag, bank account, auto-recharge settings and ledger.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    FasTagState Operations                               │
//! │                                                                         │
//! │  begin ─────► pending += 1, error cleared                               │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  backend call (.await)  ◄── the only suspension point                   │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  complete ──► one write lock: pending -= 1, apply mutation or record    │
//! │               the error message                                         │
//! │                                                                         │
//! │  NOTE: no lock is held across the backend await, so overlapping         │
//! │        operations interleave only at the backend call.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use tollpay_core::validation::validate_recharge_amount;
use tollpay_core::views::{self, LowBalanceAlert};
use tollpay_core::{
    AutoRechargeSettings, AutoRechargeUpdate, BankAccount, CoreError, CoreResult, FasTag, Ledger,
    Money, Transaction, TransactionKind, MANUAL_RECHARGE_DESCRIPTION, SEED_TAG_BALANCE,
};

use crate::backend::FasTagBackend;

/// Everything the store holds, as one consistent value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FasTagSnapshot {
    pub fas_tag: Option<FasTag>,
    pub bank_account: Option<BankAccount>,
    pub auto_recharge_settings: AutoRechargeSettings,
    pub transactions: Ledger,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct FasTagData {
    fas_tag: Option<FasTag>,
    bank_account: Option<BankAccount>,
    settings: AutoRechargeSettings,
    ledger: Ledger,
    pending: usize,
    error: Option<String>,
}

impl FasTagData {
    fn new(ledger: Ledger) -> Self {
        FasTagData {
            fas_tag: None,
            bank_account: None,
            settings: AutoRechargeSettings::default(),
            ledger,
            pending: 0,
            error: None,
        }
    }

    /// Opening balance for a newly linked tag.
    ///
    /// Follows the ledger when it has entries so that the tag balance always
    /// equals the newest resulting balance.
    fn opening_balance(&self) -> Money {
        self.ledger.latest_balance().unwrap_or(SEED_TAG_BALANCE)
    }

    fn apply_recharge(&mut self, amount: Money) -> CoreResult<Transaction> {
        validate_recharge_amount(amount)?;
        let tag = self.fas_tag.as_mut().ok_or(CoreError::NoTagLinked)?;
        tag.balance = tag
            .balance
            .checked_add(amount)
            .ok_or(CoreError::BalanceOverflow {
                balance: tag.balance,
                requested: amount,
            })?;

        let tx = Transaction::new(
            Utc::now(),
            TransactionKind::Recharge,
            amount,
            MANUAL_RECHARGE_DESCRIPTION,
            tag.balance,
        );
        self.ledger.record(tx.clone());
        Ok(tx)
    }

    fn apply_deduction(&mut self, amount: Money, description: &str) -> CoreResult<Transaction> {
        validate_recharge_amount(amount)?;
        let tag = self.fas_tag.as_mut().ok_or(CoreError::NoTagLinked)?;
        let remaining = tag
            .balance
            .checked_debit(amount)
            .ok_or(CoreError::InsufficientBalance {
                balance: tag.balance,
                requested: amount,
            })?;
        tag.balance = remaining;

        let tx = Transaction::new(
            Utc::now(),
            TransactionKind::Deduction,
            amount,
            description,
            remaining,
        );
        self.ledger.record(tx.clone());
        Ok(tx)
    }

    fn snapshot(&self) -> FasTagSnapshot {
        FasTagSnapshot {
            fas_tag: self.fas_tag.clone(),
            bank_account: self.bank_account.clone(),
            auto_recharge_settings: self.settings,
            transactions: self.ledger.clone(),
            is_loading: self.pending > 0,
            error: self.error.clone(),
        }
    }
}

/// Session-scoped FASTag store.
///
/// Cloning is cheap and every clone shares the same state, so the handle
/// can be passed to as many views as need it.
#[derive(Clone)]
pub struct FasTagState {
    data: Arc<RwLock<FasTagData>>,
    backend: Arc<dyn FasTagBackend>,
}

impl std::fmt::Debug for FasTagState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FasTagState").finish_non_exhaustive()
    }
}

impl FasTagState {
    /// Creates a store with the demo history.
    pub fn new(backend: Arc<dyn FasTagBackend>) -> Self {
        Self::with_ledger(backend, Ledger::seeded())
    }

    /// Creates a store starting from `ledger`.
    pub fn with_ledger(backend: Arc<dyn FasTagBackend>, ledger: Ledger) -> Self {
        FasTagState {
            data: Arc::new(RwLock::new(FasTagData::new(ledger))),
            backend,
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Links a tag, replacing any current one.
    ///
    /// Input is trusted: the command layer validates formats first.
    pub async fn link_tag(&self, tag_id: &str, vehicle_number: &str) -> CoreResult<FasTag> {
        self.begin().await;
        let outcome = self
            .backend
            .link_tag(tag_id, vehicle_number)
            .await
            .map_err(CoreError::from);

        self.complete("link_tag", outcome, |data| {
            let tag = FasTag::linked(tag_id, vehicle_number, data.opening_balance());
            info!(tag_id, vehicle_number, balance = %tag.balance, "FASTag linked");
            data.fas_tag = Some(tag.clone());
            Ok(tag)
        })
        .await
    }

    /// Links a bank account, replacing any current one.
    pub async fn link_bank_account(
        &self,
        bank_name: &str,
        account_number: &str,
        ifsc_code: &str,
    ) -> CoreResult<BankAccount> {
        self.begin().await;
        let outcome = self
            .backend
            .link_bank_account(bank_name, account_number, ifsc_code)
            .await
            .map_err(CoreError::from);

        self.complete("link_bank_account", outcome, |data| {
            let account = BankAccount::linked(bank_name, account_number, ifsc_code);
            info!(
                bank_name,
                account = %account.masked_account_number(),
                ifsc_code,
                "bank account linked"
            );
            data.bank_account = Some(account.clone());
            Ok(account)
        })
        .await
    }

    /// Merges `update` into the auto-recharge settings. Never fails.
    pub async fn update_auto_recharge_settings(&self, update: &AutoRechargeUpdate) -> AutoRechargeSettings {
        let mut data = self.data.write().await;
        data.settings.apply(update);
        info!(
            enabled = data.settings.is_enabled,
            min_threshold = %data.settings.min_threshold,
            recharge_amount = %data.settings.recharge_amount,
            "auto-recharge settings updated"
        );
        data.settings
    }

    /// Tops up the linked tag by `amount`.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] if `amount` is not positive
    /// - [`CoreError::NoTagLinked`] if no tag is linked (ledger unchanged)
    /// - [`CoreError::BalanceOverflow`] if the new balance cannot be represented
    /// - [`CoreError::OperationFailed`] if the backend call fails
    pub async fn recharge_manually(&self, amount: Money) -> CoreResult<Transaction> {
        let tag_id = self.begin().await;
        let outcome = match (tag_id, validate_recharge_amount(amount)) {
            (_, Err(e)) => Err(CoreError::from(e)),
            (None, Ok(())) => Err(CoreError::NoTagLinked),
            (Some(tag_id), Ok(())) => self.backend.recharge(&tag_id, amount).await.map_err(CoreError::from),
        };

        self.complete("recharge_manually", outcome, |data| {
            let tx = data.apply_recharge(amount)?;
            info!(amount = %amount, balance = %tx.resulting_balance, "manual recharge applied");
            Ok(tx)
        })
        .await
    }

    /// Debits a toll from the linked tag.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] if `amount` is not positive
    /// - [`CoreError::NoTagLinked`] if no tag is linked
    /// - [`CoreError::InsufficientBalance`] if the balance would go negative
    /// - [`CoreError::OperationFailed`] if the backend call fails
    pub async fn deduct_toll(&self, amount: Money, description: &str) -> CoreResult<Transaction> {
        let tag_id = self.begin().await;
        let outcome = match (tag_id, validate_recharge_amount(amount)) {
            (_, Err(e)) => Err(CoreError::from(e)),
            (None, Ok(())) => Err(CoreError::NoTagLinked),
            (Some(tag_id), Ok(())) => self.backend.settle_toll(&tag_id, amount).await.map_err(CoreError::from),
        };

        self.complete("deduct_toll", outcome, |data| {
            let tx = data.apply_deduction(amount, description)?;
            info!(amount = %amount, balance = %tx.resulting_balance, description, "toll deducted");
            Ok(tx)
        })
        .await
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub async fn snapshot(&self) -> FasTagSnapshot {
        self.data.read().await.snapshot()
    }

    pub async fn fas_tag(&self) -> Option<FasTag> {
        self.data.read().await.fas_tag.clone()
    }

    pub async fn bank_account(&self) -> Option<BankAccount> {
        self.data.read().await.bank_account.clone()
    }

    pub async fn auto_recharge_settings(&self) -> AutoRechargeSettings {
        self.data.read().await.settings
    }

    /// Ledger copy, newest first.
    pub async fn transactions(&self) -> Ledger {
        self.data.read().await.ledger.clone()
    }

    /// False when no tag is linked.
    pub async fn is_low_balance(&self) -> bool {
        let data = self.data.read().await;
        data.fas_tag
            .as_ref()
            .is_some_and(|tag| views::is_low_balance(tag, &data.settings))
    }

    pub async fn low_balance_alert(&self) -> LowBalanceAlert {
        let data = self.data.read().await;
        views::low_balance_alert(data.fas_tag.as_ref(), &data.settings)
    }

    /// True while any operation is awaiting the backend.
    pub async fn is_loading(&self) -> bool {
        self.data.read().await.pending > 0
    }

    /// Message of the most recent failure since the last operation started.
    pub async fn last_error(&self) -> Option<String> {
        self.data.read().await.error.clone()
    }

    // -------------------------------------------------------------------------
    // Bookkeeping
    // -------------------------------------------------------------------------

    /// Marks an operation in flight and returns the current tag id.
    async fn begin(&self) -> Option<String> {
        let mut data = self.data.write().await;
        data.pending += 1;
        data.error = None;
        data.fas_tag.as_ref().map(|tag| tag.tag_id.clone())
    }

    /// Finishes an operation under a single write lock.
    async fn complete<T>(
        &self,
        operation: &'static str,
        outcome: CoreResult<()>,
        apply: impl FnOnce(&mut FasTagData) -> CoreResult<T>,
    ) -> CoreResult<T> {
        let mut data = self.data.write().await;
        data.pending = data.pending.saturating_sub(1);

        let result = outcome.and_then(|()| apply(&mut data));
        if let Err(e) = &result {
            warn!(operation, error = %e, "FASTag operation failed");
            data.error = Some(e.to_string());
        }
        result
    }
}
