//! # State Module
//!
//! Session-scoped stores. Each store owns one slice of the session and can
//! be handed to commands independently.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────────┐  │
//! │  │      AuthState       │        │           FasTagState            │  │
//! │  │                      │        │                                  │  │
//! │  │  Arc<RwLock<         │        │  Arc<RwLock<                     │  │
//! │  │    user, pending,    │        │    tag, bank account, settings,  │  │
//! │  │    error             │        │    ledger, pending, error        │  │
//! │  │  >>                  │        │  >>                              │  │
//! │  └──────────┬───────────┘        └────────────────┬─────────────────┘  │
//! │             ▼                                     ▼                     │
//! │       dyn AuthBackend                      dyn FasTagBackend            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Handles are Clone; clones share one store                           │
//! │  • Locks are never held across a backend await                         │
//! │  • The two stores are independent: logout leaves FASTag data alone     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod fastag;

pub use auth::{AuthSnapshot, AuthState};
pub use fastag::{FasTagSnapshot, FasTagState};
