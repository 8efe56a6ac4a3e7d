//! Navigation auth gate.
//!
//! The gate re-verifies the session token on every navigation and
//! decides whether the view may render or the caller must go to the
//! login page. Verification failures of any kind fail closed: the
//! caller is treated as unauthenticated.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use bookstack_auth::{Identity, IdentityVerifier};

use crate::client::TokenTransport;

/// What the gate currently knows about the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// No navigation has happened yet.
    Init,
    /// A verification is in flight.
    Verifying,
    /// The token resolved to this identity.
    Authenticated(Identity),
    /// No token, or the token failed verification.
    Unauthenticated,
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested view.
    Proceed,
    /// Send the caller to the login page.
    RedirectToLogin,
}

/// Per-navigation session gate.
///
/// Concurrent navigations race; only the newest one's result is kept.
/// Results from superseded verifications are discarded so the state
/// never moves backwards.
pub struct AuthGate<V, T> {
    verifier: Arc<V>,
    transport: Arc<T>,
    login_path: String,
    state: RwLock<GateState>,
    generation: AtomicU64,
}

impl<V, T> AuthGate<V, T>
where
    V: IdentityVerifier,
    T: TokenTransport,
{
    /// Create a gate redirecting unauthenticated callers to `login_path`.
    #[must_use]
    pub fn new(verifier: Arc<V>, transport: Arc<T>, login_path: impl Into<String>) -> Self {
        Self {
            verifier,
            transport,
            login_path: login_path.into(),
            state: RwLock::new(GateState::Init),
            generation: AtomicU64::new(0),
        }
    }

    /// Run the session check for a navigation to `path`.
    ///
    /// The redirect is suppressed when the caller is already heading to
    /// the login page, so an unauthenticated visit there never loops.
    pub async fn on_navigate(&self, path: &str) -> Navigation {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write() = GateState::Verifying;

        let (next_state, authenticated) = match self.transport.current_token() {
            None => (GateState::Unauthenticated, false),
            Some(token) => match self.verifier.verify(&token).await {
                Ok(identity) => (GateState::Authenticated(identity), true),
                Err(err) => {
                    tracing::debug!(error = %err, "Session verification failed");
                    (GateState::Unauthenticated, false)
                }
            },
        };

        if self.generation.load(Ordering::SeqCst) == generation {
            *self.state.write() = next_state;
        } else {
            tracing::debug!(generation, "Discarding superseded verification result");
        }

        if authenticated || path == self.login_path {
            Navigation::Proceed
        } else {
            Navigation::RedirectToLogin
        }
    }

    /// Drop the session: clear the transport's token and forget the
    /// identity. Any in-flight verification result is discarded.
    pub fn logout(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.transport.clear_token();
        *self.state.write() = GateState::Unauthenticated;
    }

    /// The identity, when the last navigation authenticated.
    ///
    /// `None` while a verification is still in flight.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match &*self.state.read() {
            GateState::Authenticated(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    /// Snapshot of the current gate state.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.state.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookstack_auth::MockVerifier;
    use bookstack_core::{Role, UserId};

    struct StubTransport {
        token: RwLock<Option<String>>,
    }

    impl StubTransport {
        fn with_token(token: &str) -> Arc<Self> {
            Arc::new(Self {
                token: RwLock::new(Some(token.to_string())),
            })
        }

        fn empty() -> Arc<Self> {
            Arc::new(Self {
                token: RwLock::new(None),
            })
        }
    }

    impl TokenTransport for StubTransport {
        fn current_token(&self) -> Option<String> {
            self.token.read().clone()
        }

        fn store_token(&self, token: &str) {
            *self.token.write() = Some(token.to_string());
        }

        fn clear_token(&self) {
            *self.token.write() = None;
        }
    }

    fn identity(id: u64) -> Identity {
        Identity {
            user_id: UserId::new(id),
            first_name: "Mira".into(),
            last_name: "Voss".into(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn fresh_gate_is_init() {
        let gate = AuthGate::new(
            Arc::new(MockVerifier::default()),
            StubTransport::empty(),
            "/login",
        );
        assert_eq!(gate.state(), GateState::Init);
        assert!(gate.identity().is_none());
    }

    #[tokio::test]
    async fn missing_token_redirects_to_login() {
        let gate = AuthGate::new(
            Arc::new(MockVerifier::default()),
            StubTransport::empty(),
            "/login",
        );
        assert_eq!(gate.on_navigate("/books").await, Navigation::RedirectToLogin);
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn valid_token_proceeds() {
        let verifier = Arc::new(MockVerifier::default());
        verifier.register("5", identity(5));

        let gate = AuthGate::new(verifier, StubTransport::with_token("5"), "/login");
        assert_eq!(gate.on_navigate("/books").await, Navigation::Proceed);
        assert_eq!(gate.identity().unwrap().user_id, UserId::new(5));
    }

    #[tokio::test]
    async fn stale_token_fails_closed() {
        let gate = AuthGate::new(
            Arc::new(MockVerifier::default()),
            StubTransport::with_token("999"),
            "/login",
        );
        assert_eq!(gate.on_navigate("/books").await, Navigation::RedirectToLogin);
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn redirect_is_suppressed_at_the_login_page() {
        let gate = AuthGate::new(
            Arc::new(MockVerifier::default()),
            StubTransport::empty(),
            "/login",
        );
        assert_eq!(gate.on_navigate("/login").await, Navigation::Proceed);
        // Still not authenticated, just allowed to render login.
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn logout_clears_token_and_state() {
        let verifier = Arc::new(MockVerifier::default());
        verifier.register("5", identity(5));
        let transport = StubTransport::with_token("5");

        let gate = AuthGate::new(verifier, Arc::clone(&transport), "/login");
        gate.on_navigate("/books").await;
        assert!(gate.identity().is_some());

        gate.logout();
        assert!(gate.identity().is_none());
        assert!(transport.current_token().is_none());
        assert_eq!(gate.on_navigate("/books").await, Navigation::RedirectToLogin);
    }

    /// Verifier that blocks until notified, for racing navigations.
    struct BlockedVerifier {
        release: tokio::sync::Notify,
    }

    #[async_trait]
    impl IdentityVerifier for BlockedVerifier {
        async fn verify(&self, _token: &str) -> bookstack_auth::Result<Identity> {
            self.release.notified().await;
            Ok(identity(5))
        }
    }

    #[tokio::test]
    async fn superseded_verification_is_discarded() {
        let verifier = Arc::new(BlockedVerifier {
            release: tokio::sync::Notify::new(),
        });
        let transport = StubTransport::with_token("5");
        let gate = Arc::new(AuthGate::new(
            Arc::clone(&verifier),
            Arc::clone(&transport),
            "/login",
        ));

        // First navigation parks inside the verifier.
        let first = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.on_navigate("/books").await })
        };
        tokio::task::yield_now().await;

        // Second navigation with the token gone resolves immediately.
        transport.clear_token();
        assert_eq!(gate.on_navigate("/books").await, Navigation::RedirectToLogin);
        assert_eq!(gate.state(), GateState::Unauthenticated);

        // Release the first verification; its stale success must not
        // overwrite the newer unauthenticated state.
        verifier.release.notify_one();
        first.await.unwrap();
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn backend_failure_fails_closed() {
        let verifier = Arc::new(MockVerifier::default());
        verifier.register("5", identity(5));
        verifier
            .fail_all
            .store(true, std::sync::atomic::Ordering::Relaxed);

        let gate = AuthGate::new(verifier, StubTransport::with_token("5"), "/login");
        assert_eq!(gate.on_navigate("/books").await, Navigation::RedirectToLogin);
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }
}
