//! # Settings Commands
//!
//! Auto-recharge settings and session configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Auto-Recharge                                           [ ON | off ]   │
//! │                                                                         │
//! │  Minimum balance threshold    ₹100 ──────●────────── ₹1000   (₹100)     │
//! │  Recharge amount              ₹200 ───●───────────── ₹5000   (₹100)     │
//! │                                                                         │
//! │  invoke('update_auto_recharge_settings', { minThreshold: 40000 })       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use tollpay_core::validation::{validate_auto_recharge_form, RECHARGE_AMOUNT_RANGE, SETTINGS_STEP, THRESHOLD_RANGE};
use tollpay_core::{AutoRechargeSettings, AutoRechargeUpdate, Money};

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::state::FasTagState;

/// Slider bounds for one settings input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountBounds {
    pub min: Money,
    pub max: Money,
    pub step: Money,
}

impl AmountBounds {
    fn new((min, max): (Money, Money)) -> Self {
        AmountBounds {
            min,
            max,
            step: SETTINGS_STEP,
        }
    }
}

/// Current settings plus the bounds the form enforces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub settings: AutoRechargeSettings,
    pub threshold_bounds: AmountBounds,
    pub recharge_amount_bounds: AmountBounds,
}

pub async fn get_auto_recharge_settings(fastag: &FasTagState) -> SettingsResponse {
    debug!("get_auto_recharge_settings command");
    SettingsResponse {
        settings: fastag.auto_recharge_settings().await,
        threshold_bounds: AmountBounds::new(THRESHOLD_RANGE),
        recharge_amount_bounds: AmountBounds::new(RECHARGE_AMOUNT_RANGE),
    }
}

/// Validates the changed fields and merges them into the settings.
///
/// An empty update is accepted and returns the current settings.
pub async fn update_auto_recharge_settings(
    fastag: &FasTagState,
    update: AutoRechargeUpdate,
) -> Result<AutoRechargeSettings, ApiError> {
    debug!(?update, "update_auto_recharge_settings command");

    let update = validate_auto_recharge_form(&update)?;
    Ok(fastag.update_auto_recharge_settings(&update).await)
}

pub fn get_config(config: &SessionConfig) -> SessionConfig {
    debug!("get_config command");
    config.clone()
}
