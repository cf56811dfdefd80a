//! # Backend Port
//!
//! The boundary between session stores and whatever actually talks to the
//! tag issuer, the bank and the identity provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   FasTagState ──► FasTagBackend ──┐                                     │
//! │                                   ├──► MockBackend (sleep + canned data)│
//! │   AuthState   ──► AuthBackend   ──┘        │                            │
//! │                                            └─► a real client later      │
//! │                                                                         │
//! │   Stores suspend exactly once per operation: on the port call.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only confirmations cross the port. Balances and ledger entries are
//! computed by the stores, so swapping the backend never touches ledger or
//! validation logic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tollpay_core::{CoreError, Money, User};
use tracing::{debug, warn};
use uuid::Uuid;

// =============================================================================
// Errors
// =============================================================================

/// Failures reported by a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The service could not be reached or timed out.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Backend failures surface as the generic `OperationFailed`.
impl From<BackendError> for CoreError {
    fn from(err: BackendError) -> Self {
        CoreError::OperationFailed(err.to_string())
    }
}

// =============================================================================
// Ports
// =============================================================================

/// Tag issuer and payment side.
#[async_trait]
pub trait FasTagBackend: Send + Sync {
    /// Registers the tag against the vehicle with the issuer.
    async fn link_tag(&self, tag_id: &str, vehicle_number: &str) -> BackendResult<()>;

    /// Verifies and mandates the bank account.
    async fn link_bank_account(
        &self,
        bank_name: &str,
        account_number: &str,
        ifsc_code: &str,
    ) -> BackendResult<()>;

    /// Charges the linked account and credits the tag.
    async fn recharge(&self, tag_id: &str, amount: Money) -> BackendResult<()>;

    /// Settles a toll plaza debit against the tag.
    async fn settle_toll(&self, tag_id: &str, amount: Money) -> BackendResult<()>;
}

/// Identity provider.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Returns the account for valid credentials, `None` when rejected.
    async fn authenticate(&self, email: &str, password: &str) -> BackendResult<Option<User>>;

    /// Creates an account.
    async fn register(&self, name: &str, email: &str, phone: &str, password: &str) -> BackendResult<User>;
}

// =============================================================================
// Mock Backend
// =============================================================================

/// The only credential pair the mock identity provider accepts.
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";

/// The identity returned for the demo credentials.
pub fn demo_user() -> User {
    User {
        id: "123".to_string(),
        name: "Demo User".to_string(),
        email: DEMO_EMAIL.to_string(),
        phone: "9876543210".to_string(),
    }
}

/// In-process stand-in for every backend service.
///
/// Each call sleeps for the configured latency and then succeeds, unless the
/// backend has been switched offline with [`MockBackend::set_offline`].
#[derive(Debug, Default)]
pub struct MockBackend {
    latency: Duration,
    offline: AtomicBool,
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        MockBackend {
            latency,
            offline: AtomicBool::new(false),
        }
    }

    /// Zero-latency backend for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// While offline every call fails with [`BackendError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    async fn round_trip(&self, call: &'static str) -> BackendResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            warn!(call, "mock backend offline");
            return Err(BackendError::Unavailable(format!("{} timed out", call)));
        }
        debug!(call, latency_ms = self.latency.as_millis() as u64, "mock backend call");
        Ok(())
    }
}

#[async_trait]
impl FasTagBackend for MockBackend {
    async fn link_tag(&self, _tag_id: &str, _vehicle_number: &str) -> BackendResult<()> {
        self.round_trip("link_tag").await
    }

    async fn link_bank_account(
        &self,
        _bank_name: &str,
        _account_number: &str,
        _ifsc_code: &str,
    ) -> BackendResult<()> {
        self.round_trip("link_bank_account").await
    }

    async fn recharge(&self, _tag_id: &str, _amount: Money) -> BackendResult<()> {
        self.round_trip("recharge").await
    }

    async fn settle_toll(&self, _tag_id: &str, _amount: Money) -> BackendResult<()> {
        self.round_trip("settle_toll").await
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn authenticate(&self, email: &str, password: &str) -> BackendResult<Option<User>> {
        self.round_trip("authenticate").await?;
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            Ok(Some(demo_user()))
        } else {
            Ok(None)
        }
    }

    async fn register(&self, name: &str, email: &str, phone: &str, _password: &str) -> BackendResult<User> {
        self.round_trip("register").await?;
        Ok(User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_credentials_only() {
        let backend = MockBackend::instant();

        let user = backend.authenticate(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert_eq!(user, Some(demo_user()));

        assert_eq!(backend.authenticate(DEMO_EMAIL, "wrong").await.unwrap(), None);
        assert_eq!(backend.authenticate("someone@example.com", DEMO_PASSWORD).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_echoes_fields() {
        let backend = MockBackend::instant();
        let user = backend
            .register("Asha Rao", "asha@example.com", "9123456780", "Secur3!pass")
            .await
            .unwrap();

        assert_eq!(user.name, "Asha Rao");
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.phone, "9123456780");
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[tokio::test]
    async fn test_offline_backend_fails_every_call() {
        let backend = MockBackend::instant();
        backend.set_offline(true);

        let err = backend.recharge("1234567890123456", Money::from_rupees(500)).await.unwrap_err();
        assert_eq!(err, BackendError::Unavailable("recharge timed out".to_string()));

        backend.set_offline(false);
        assert!(backend.recharge("1234567890123456", Money::from_rupees(500)).await.is_ok());
    }

    #[test]
    fn test_backend_error_becomes_operation_failed() {
        let err: CoreError = BackendError::Rejected("limit exceeded".to_string()).into();
        assert!(matches!(err, CoreError::OperationFailed(_)));
        assert_eq!(err.to_string(), "Request rejected: limit exceeded");
    }
}
