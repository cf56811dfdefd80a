//! # Session Configuration
//!
//! Settings loaded once when a session starts.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TOLLPAY_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no lock is needed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tollpay_core::Money;

/// Default simulated backend latency.
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 1000;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Latency of every mock backend call, in milliseconds.
    pub simulated_delay_ms: u64,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl SessionConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TOLLPAY_SIMULATED_DELAY_MS`: backend latency, e.g. "0" for instant
    /// - `TOLLPAY_CURRENCY_SYMBOL`: display symbol
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let mut config = SessionConfig::default();

        if let Ok(delay) = std::env::var("TOLLPAY_SIMULATED_DELAY_MS") {
            if let Ok(ms) = delay.trim().parse::<u64>() {
                config.simulated_delay_ms = ms;
            }
        }

        if let Ok(symbol) = std::env::var("TOLLPAY_CURRENCY_SYMBOL") {
            if !symbol.is_empty() {
                config.currency_symbol = symbol;
            }
        }

        config
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ```rust
    /// use tollpay_core::Money;
    /// use tollpay_session::config::SessionConfig;
    ///
    /// let config = SessionConfig::default();
    /// assert_eq!(config.format_currency(Money::from_paise(42_550)), "₹425.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.rupees().abs(),
            amount.paise_part().abs()
        )
    }
}
