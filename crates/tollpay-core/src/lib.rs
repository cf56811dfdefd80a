//! # tollpay-core: Pure Domain Logic for TollPay
//!
//! This crate is the **heart** of TollPay. It holds every rule about tags,
//! bank accounts, auto-recharge settings and the transaction ledger as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TollPay Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Browser Dashboard (external)                   │   │
//! │  │   Login ──► Link Tag ──► Link Bank ──► Settings ──► History     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  tollpay-session                                │   │
//! │  │   AuthState, FasTagState, backend port, ApiError                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tollpay-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │validation│ │ ledger │ │  views  │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, FasTag, BankAccount, Transaction, ...)
//! - [`money`] - Money type in integer paise (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Format predicates and form validators
//! - [`ledger`] - Newest-first transaction ledger
//! - [`views`] - Derived views: low balance, filters, chart series
//!
//! ## Example Usage
//!
//! ```rust
//! use tollpay_core::money::Money;
//! use tollpay_core::validation::{is_valid_ifsc_code, is_valid_tag_id};
//!
//! assert!(is_valid_ifsc_code("SBIN0123456"));
//! assert!(is_valid_tag_id("1234567890123456"));
//!
//! let balance = Money::from_rupees(425) + Money::from_rupees(500);
//! assert_eq!(balance, Money::from_rupees(925));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;
pub mod views;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use ledger::Ledger;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default auto-recharge threshold: ₹300.
pub const DEFAULT_MIN_THRESHOLD: Money = Money::from_rupees(300);

/// Default auto-recharge top-up amount: ₹500.
pub const DEFAULT_RECHARGE_AMOUNT: Money = Money::from_rupees(500);

/// Balance carried by a freshly linked tag when no history exists.
///
/// The issuing authority is not contacted, so every new tag starts from the
/// same demo balance.
pub const SEED_TAG_BALANCE: Money = Money::from_rupees(425);

/// Number of rows shown in the dashboard's "recent activity" card.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// One-tap top-up amounts offered on the balance card.
pub const QUICK_RECHARGE_AMOUNTS: [Money; 3] = [
    Money::from_rupees(200),
    Money::from_rupees(500),
    Money::from_rupees(1000),
];

/// Description attached to every manual top-up.
pub const MANUAL_RECHARGE_DESCRIPTION: &str = "Manual Recharge";

/// Banks offered by the link-bank form.
pub const SUPPORTED_BANKS: [&str; 10] = [
    "State Bank of India",
    "HDFC Bank",
    "ICICI Bank",
    "Axis Bank",
    "Kotak Mahindra Bank",
    "Bank of Baroda",
    "Punjab National Bank",
    "Canara Bank",
    "Yes Bank",
    "IndusInd Bank",
];
