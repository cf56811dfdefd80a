//! # tollpay-session: Session Layer for the TollPay Dashboard
//!
//! Everything between the dashboard and the (simulated) issuer, bank and
//! identity services.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Startup                                      │
//! │                                                                         │
//! │  1. init_tracing() ───────────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info,tollpay=debug, override with RUST_LOG               │
//! │                                                                         │
//! │  2. SessionConfig::from_env() ────────────────────────────────────────► │
//! │     • TOLLPAY_SIMULATED_DELAY_MS, TOLLPAY_CURRENCY_SYMBOL               │
//! │                                                                         │
//! │  3. Session::new(config) ─────────────────────────────────────────────► │
//! │     • MockBackend with the configured latency                           │
//! │     • AuthState (anonymous)                                             │
//! │     • FasTagState (no tag, default settings, demo ledger)               │
//! │                                                                         │
//! │  4. Dashboard calls commands::* with the stores it needs                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`backend`]: async service ports and the mock implementation
//! - [`state`]: `AuthState` and `FasTagState`
//! - [`commands`]: validated entry points returning DTOs or [`ApiError`]
//! - [`config`]: `SessionConfig`
//! - [`error`]: `ApiError` and `ErrorCode`

pub mod backend;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use backend::{AuthBackend, BackendError, FasTagBackend, MockBackend};
pub use config::SessionConfig;
pub use error::{ApiError, ErrorCode};
pub use state::{AuthState, FasTagState};

/// One user's session: both stores plus the config they were built from.
///
/// Sessions are independent values. Nothing is shared between two of them
/// unless they were given the same backend.
#[derive(Debug, Clone)]
pub struct Session {
    pub auth: AuthState,
    pub fastag: FasTagState,
    pub config: SessionConfig,
}

impl Session {
    /// Creates a session backed by a [`MockBackend`] with the configured latency.
    pub fn new(config: SessionConfig) -> Self {
        let backend = Arc::new(MockBackend::new(config.simulated_delay()));
        Self::with_backend(config, backend)
    }

    /// Creates a session over any backend implementing both ports.
    pub fn with_backend<B>(config: SessionConfig, backend: Arc<B>) -> Self
    where
        B: FasTagBackend + AuthBackend + 'static,
    {
        info!(
            simulated_delay_ms = config.simulated_delay_ms,
            "starting TollPay session"
        );
        Session {
            auth: AuthState::new(backend.clone()),
            fastag: FasTagState::new(backend),
            config,
        }
    }
}

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tollpay_session=trace` - Trace this crate only
///
/// Calling it twice is harmless: the second call leaves the first
/// subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tollpay=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
