//! # Commands Module
//!
//! Everything the dashboard calls.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── auth.rs          ◄─── Login, registration, logout
//! ├── fastag.rs        ◄─── Dashboard, linking, recharge, tolls
//! ├── settings.rs      ◄─── Auto-recharge settings, session config
//! └── transactions.rs  ◄─── History, recent activity, balance chart
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  raw form input ──► validate_*_form ──► FieldErrors? ──► ApiError       │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                     store operation ──► CoreError? ──► ApiError         │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                     DTO (camelCase JSON)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the stores it needs:
//! ```rust,ignore
//! // Only needs FASTag data
//! async fn recharge(fastag: &FasTagState, amount: Money)
//!
//! // Needs both
//! async fn get_dashboard(auth: &AuthState, fastag: &FasTagState)
//! ```

pub mod auth;
pub mod fastag;
pub mod settings;
pub mod transactions;

pub use auth::*;
pub use fastag::*;
pub use settings::*;
pub use transactions::*;
