//! # FASTag Commands
//!
//! Dashboard, linking, manual recharge and toll settlement.
//!
//! ## Dashboard Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Welcome, Demo User                                                     │
//! │                                                                         │
//! │  ┌────────────────────────────┐   ┌────────────────────────────────┐   │
//! │  │  FASTag  MH01AB1234        │   │  Bank  HDFC Bank               │   │
//! │  │  Balance  ₹425.00          │   │  ••••••••9012  HDFC0001234     │   │
//! │  │  [₹200] [₹500] [₹1000]     │   │                                │   │
//! │  └────────────────────────────┘   └────────────────────────────────┘   │
//! │                                                                         │
//! │  ⚠ Your balance is below the minimum threshold of ₹500.00. ...          │
//! │                                                                         │
//! │  Recent activity (5 newest)                                             │
//! │                                                                         │
//! │  invoke('get_dashboard') → DashboardResponse                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use tollpay_core::validation::{validate_link_bank_form, validate_link_tag_form, validate_recharge_amount};
use tollpay_core::views::{self, LowBalanceAlert};
use tollpay_core::{
    AutoRechargeSettings, BankAccount, CoreError, FasTag, Money, Transaction, User,
    QUICK_RECHARGE_AMOUNTS, RECENT_TRANSACTIONS_LIMIT, SUPPORTED_BANKS,
};

use crate::error::ApiError;
use crate::state::{AuthState, FasTagState};

/// Bank account as shown to the user. The full number never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountDto {
    pub id: String,
    pub bank_name: String,
    pub masked_account_number: String,
    pub ifsc_code: String,
    pub is_linked: bool,
}

impl From<&BankAccount> for BankAccountDto {
    fn from(account: &BankAccount) -> Self {
        BankAccountDto {
            id: account.id.clone(),
            bank_name: account.bank_name.clone(),
            masked_account_number: account.masked_account_number(),
            ifsc_code: account.ifsc_code.clone(),
            is_linked: account.is_linked,
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: Option<User>,
    pub fas_tag: Option<FasTag>,
    pub bank_account: Option<BankAccountDto>,
    pub auto_recharge_settings: AutoRechargeSettings,
    pub is_low_balance: bool,
    pub low_balance_alert: LowBalanceAlert,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_message: Option<String>,
    pub recent_transactions: Vec<Transaction>,
    pub quick_recharge_amounts: Vec<Money>,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a top-up or toll deduction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChangeResponse {
    pub transaction: Transaction,
    pub balance: Money,
}

impl From<Transaction> for BalanceChangeResponse {
    fn from(transaction: Transaction) -> Self {
        BalanceChangeResponse {
            balance: transaction.resulting_balance,
            transaction,
        }
    }
}

/// Builds the dashboard from one consistent snapshot of each store.
pub async fn get_dashboard(auth: &AuthState, fastag: &FasTagState) -> DashboardResponse {
    debug!("get_dashboard command");

    let user = auth.current_user().await;
    let snapshot = fastag.snapshot().await;
    let settings = snapshot.auto_recharge_settings;
    let alert = views::low_balance_alert(snapshot.fas_tag.as_ref(), &settings);

    DashboardResponse {
        user,
        is_low_balance: alert != LowBalanceAlert::Clear,
        alert_message: alert.message(&settings),
        low_balance_alert: alert,
        bank_account: snapshot.bank_account.as_ref().map(BankAccountDto::from),
        fas_tag: snapshot.fas_tag,
        auto_recharge_settings: settings,
        recent_transactions: views::recent_transactions(
            snapshot.transactions.as_slice(),
            RECENT_TRANSACTIONS_LIMIT,
        )
        .to_vec(),
        quick_recharge_amounts: QUICK_RECHARGE_AMOUNTS.to_vec(),
        is_loading: snapshot.is_loading,
        error: snapshot.error,
    }
}

/// Validates and links a FASTag.
pub async fn link_fastag(fastag: &FasTagState, tag_id: &str, vehicle_number: &str) -> Result<FasTag, ApiError> {
    debug!(tag_id = %tag_id, "link_fastag command");

    let input = validate_link_tag_form(tag_id, vehicle_number)?;
    Ok(fastag.link_tag(&input.tag_id, &input.vehicle_number).await?)
}

/// Validates and links a bank account.
pub async fn link_bank_account(
    fastag: &FasTagState,
    bank_name: &str,
    account_number: &str,
    confirm_account_number: &str,
    ifsc_code: &str,
) -> Result<BankAccountDto, ApiError> {
    debug!(
        bank_name = %bank_name,
        account = %views::mask_account_number(account_number),
        "link_bank_account command"
    );

    let input = validate_link_bank_form(bank_name, account_number, confirm_account_number, ifsc_code)?;
    let account = fastag
        .link_bank_account(&input.bank_name, &input.account_number, &input.ifsc_code)
        .await?;
    Ok(BankAccountDto::from(&account))
}

/// Tops up the linked tag.
pub async fn recharge(fastag: &FasTagState, amount: Money) -> Result<BalanceChangeResponse, ApiError> {
    debug!(amount = %amount, "recharge command");

    validate_recharge_amount(amount).map_err(CoreError::from)?;
    Ok(fastag.recharge_manually(amount).await?.into())
}

/// Settles a toll plaza debit.
pub async fn deduct_toll(
    fastag: &FasTagState,
    amount: Money,
    description: &str,
) -> Result<BalanceChangeResponse, ApiError> {
    debug!(amount = %amount, description = %description, "deduct_toll command");

    if !amount.is_positive() {
        return Err(ApiError::validation("Toll amount must be positive"));
    }
    if description.trim().is_empty() {
        return Err(ApiError::validation("Toll description is required"));
    }
    Ok(fastag.deduct_toll(amount, description.trim()).await?.into())
}

/// Banks offered by the link-bank form.
pub fn list_banks() -> Vec<&'static str> {
    SUPPORTED_BANKS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockBackend, DEMO_EMAIL, DEMO_PASSWORD};
    use crate::error::ErrorCode;
    use std::sync::Arc;
    use tollpay_core::AutoRechargeUpdate;

    fn stores() -> (AuthState, FasTagState) {
        let backend = Arc::new(MockBackend::instant());
        (AuthState::new(backend.clone()), FasTagState::new(backend))
    }

    #[tokio::test]
    async fn test_dashboard_before_linking() {
        let (auth, fastag) = stores();
        let dashboard = get_dashboard(&auth, &fastag).await;

        assert!(dashboard.user.is_none());
        assert!(dashboard.fas_tag.is_none());
        assert_eq!(dashboard.low_balance_alert, LowBalanceAlert::Clear);
        assert!(dashboard.alert_message.is_none());
        assert_eq!(dashboard.recent_transactions.len(), 2);
        assert_eq!(dashboard.quick_recharge_amounts, QUICK_RECHARGE_AMOUNTS.to_vec());
    }

    #[tokio::test]
    async fn test_dashboard_masks_account_and_warns() {
        let (auth, fastag) = stores();
        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        link_fastag(&fastag, "1234567890123456", "mh01ab1234").await.unwrap();
        link_bank_account(&fastag, "HDFC Bank", "987654321098", "987654321098", "hdfc0001234")
            .await
            .unwrap();
        fastag
            .update_auto_recharge_settings(&AutoRechargeUpdate::default().min_threshold(Money::from_rupees(500)))
            .await;

        let dashboard = get_dashboard(&auth, &fastag).await;
        assert_eq!(dashboard.fas_tag.unwrap().vehicle_number, "MH01AB1234");

        let bank = dashboard.bank_account.unwrap();
        assert_eq!(bank.masked_account_number, "••••••••1098");
        assert_eq!(bank.ifsc_code, "HDFC0001234");

        assert!(dashboard.is_low_balance);
        assert_eq!(dashboard.low_balance_alert, LowBalanceAlert::EnableAutoRecharge);
        assert!(dashboard
            .alert_message
            .unwrap()
            .ends_with("Enable auto-recharge in settings to avoid inconvenience."));

        let json = serde_json::to_string(&get_dashboard(&auth, &fastag).await).unwrap();
        assert!(!json.contains("987654321098"));
    }

    #[tokio::test]
    async fn test_link_fastag_rejects_bad_input() {
        let (_, fastag) = stores();
        let err = link_fastag(&fastag, "12345", "MH01AB1234").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.fields.unwrap().get("tagId"),
            Some("Please enter a valid 16-digit FASTag ID")
        );
        assert!(fastag.fas_tag().await.is_none());
    }

    #[tokio::test]
    async fn test_recharge_command() {
        let (_, fastag) = stores();
        let err = recharge(&fastag, Money::from_rupees(500)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoTagLinked);

        link_fastag(&fastag, "1234567890123456", "MH01AB1234").await.unwrap();
        let response = recharge(&fastag, Money::from_rupees(500)).await.unwrap();
        assert_eq!(response.balance, Money::from_rupees(925));
        assert_eq!(response.transaction.description, "Manual Recharge");

        let err = recharge(&fastag, Money::zero()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = recharge(&fastag, Money::from_paise(i64::MAX)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(fastag.fas_tag().await.unwrap().balance, Money::from_rupees(925));
    }

    #[tokio::test]
    async fn test_deduct_toll_command() {
        let (_, fastag) = stores();
        link_fastag(&fastag, "1234567890123456", "MH01AB1234").await.unwrap();

        let response = deduct_toll(&fastag, Money::from_rupees(75), "Toll Payment - NH8").await.unwrap();
        assert_eq!(response.balance, Money::from_rupees(350));

        let err = deduct_toll(&fastag, Money::from_rupees(1000), "Toll Payment - NH8").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientBalance);

        let err = deduct_toll(&fastag, Money::from_rupees(10), "  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_list_banks() {
        let banks = list_banks();
        assert_eq!(banks.len(), 10);
        assert_eq!(banks[0], "State Bank of India");
    }
}
