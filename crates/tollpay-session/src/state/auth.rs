//! # Auth State
//!
//! Who is signed in to this session.
//!
//! ```text
//!   Anonymous ──login(ok)/register──► Authenticated(User)
//!       ▲                                   │
//!       └────────────── logout ─────────────┘
//!
//!   login(bad credentials) ──► stays Anonymous, error = "Invalid credentials"
//! ```
//!
//! Passwords are handed to the backend and never stored or logged.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use tollpay_core::{CoreError, CoreResult, User};

use crate::backend::AuthBackend;

/// Serializable view of the auth store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct AuthData {
    user: Option<User>,
    pending: usize,
    error: Option<String>,
}

/// Session-scoped auth store.
#[derive(Clone)]
pub struct AuthState {
    data: Arc<RwLock<AuthData>>,
    backend: Arc<dyn AuthBackend>,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState").finish_non_exhaustive()
    }
}

impl AuthState {
    /// Creates an anonymous session.
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        AuthState {
            data: Arc::new(RwLock::new(AuthData::default())),
            backend,
        }
    }

    /// Signs in with email and password.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidCredentials`] when the backend rejects the pair
    /// - [`CoreError::OperationFailed`] when the backend cannot be reached
    ///
    /// A failed login leaves any current user untouched.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<User> {
        self.begin().await;
        let outcome = match self.backend.authenticate(email, password).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(CoreError::InvalidCredentials),
            Err(e) => Err(CoreError::from(e)),
        };
        self.complete("login", outcome).await
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, name: &str, email: &str, phone: &str, password: &str) -> CoreResult<User> {
        self.begin().await;
        let outcome = self
            .backend
            .register(name, email, phone, password)
            .await
            .map_err(CoreError::from);
        self.complete("register", outcome).await
    }

    /// Signs out. Calling it while anonymous is a no-op.
    pub async fn logout(&self) {
        let mut data = self.data.write().await;
        if let Some(user) = data.user.take() {
            info!(user_id = %user.id, "user logged out");
        }
        data.error = None;
    }

    pub async fn current_user(&self) -> Option<User> {
        self.data.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.data.read().await.user.is_some()
    }

    pub async fn is_loading(&self) -> bool {
        self.data.read().await.pending > 0
    }

    pub async fn last_error(&self) -> Option<String> {
        self.data.read().await.error.clone()
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        let data = self.data.read().await;
        AuthSnapshot {
            user: data.user.clone(),
            is_authenticated: data.user.is_some(),
            is_loading: data.pending > 0,
            error: data.error.clone(),
        }
    }

    async fn begin(&self) {
        let mut data = self.data.write().await;
        data.pending += 1;
        data.error = None;
    }

    async fn complete(&self, operation: &'static str, outcome: CoreResult<User>) -> CoreResult<User> {
        let mut data = self.data.write().await;
        data.pending = data.pending.saturating_sub(1);

        match outcome {
            Ok(user) => {
                info!(operation, user_id = %user.id, "user signed in");
                data.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                warn!(operation, error = %e, "authentication failed");
                data.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{demo_user, MockBackend, DEMO_EMAIL, DEMO_PASSWORD};

    fn store() -> (AuthState, Arc<MockBackend>) {
        let backend = Arc::new(MockBackend::instant());
        (AuthState::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn test_login_with_demo_credentials() {
        let (auth, _) = store();
        let user = auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert_eq!(user, demo_user());
        assert!(auth.is_authenticated().await);
        assert_eq!(auth.current_user().await, Some(demo_user()));
        assert!(!auth.is_loading().await);
    }

    #[tokio::test]
    async fn test_failed_login_stays_anonymous() {
        let (auth, _) = store();
        let err = auth.login(DEMO_EMAIL, "letmein").await.unwrap_err();

        assert!(matches!(err, CoreError::InvalidCredentials));
        assert!(!auth.is_authenticated().await);
        assert_eq!(auth.last_error().await.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_current_user() {
        let (auth, _) = store();
        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        auth.login("someone@example.com", "nope").await.unwrap_err();

        assert_eq!(auth.current_user().await, Some(demo_user()));
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let (auth, _) = store();
        let user = auth
            .register("Asha Rao", "asha@example.com", "9123456780", "Secur3!pass")
            .await
            .unwrap();

        assert_eq!(user.email, "asha@example.com");
        assert_eq!(auth.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (auth, _) = store();
        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        auth.logout().await;
        assert!(!auth.is_authenticated().await);

        auth.logout().await;
        let snapshot = auth.snapshot().await;
        assert!(snapshot.user.is_none());
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_backend_outage_reports_operation_failed() {
        let (auth, backend) = store();
        backend.set_offline(true);

        let err = auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap_err();
        assert!(matches!(err, CoreError::OperationFailed(_)));
        assert!(!auth.is_authenticated().await);
    }
}
