//! Sign-in session over a managed identity provider.
//!
//! The provider owns identity and tokens. Login is a browser redirect, so
//! `login` never yields a user; the user shows up later through the
//! session-change subscription made once in [`AuthSession::start`].

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use async_trait::async_trait;
use tracing::{error, info};
use xt_core::{Result, User};

pub type SessionCallback = Box<dyn Fn(Option<User>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// User from a redirect sign-in that just completed, if any.
    async fn redirect_result(&self) -> Result<Option<User>>;

    /// Start the redirect flow; completion arrives via the subscription.
    async fn initiate_login(&self) -> Result<()>;

    async fn logout(&self) -> Result<()>;

    /// Called with the current user now and on every later change.
    fn observe_session_changes(&self, callback: SessionCallback) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

#[derive(Debug, Clone, Default)]
struct SessionState {
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    state: Arc<RwLock<SessionState>>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: Arc::new(RwLock::new(SessionState {
                loading: true,
                ..SessionState::default()
            })),
            subscription: Mutex::new(None),
        }
    }

    fn read(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.state.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Pick up a finished redirect and subscribe to session changes. Idempotent.
    pub async fn start(&self) {
        if self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
        {
            return;
        }

        match self.provider.redirect_result().await {
            Ok(Some(user)) => {
                info!("Signed in via redirect as {}", user.uid);
                self.update(|s| s.user = Some(user));
            }
            Ok(None) => {}
            Err(e) => {
                error!("Redirect result error: {}", e);
                self.update(|s| s.error = Some(e.to_string()));
            }
        }

        let state = Arc::clone(&self.state);
        let id = self.provider.observe_session_changes(Box::new(move |user| {
            let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
            state.user = user;
            state.loading = false;
        }));

        let mut subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match *subscription {
            // Lost a race with a concurrent start; keep the first subscription.
            Some(_) => self.provider.unsubscribe(id),
            None => *subscription = Some(id),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.read().user
    }

    pub fn is_signed_in(&self) -> bool {
        self.read().user.is_some()
    }

    /// True until the provider has reported the session once.
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn auth_error(&self) -> Option<String> {
        self.read().error
    }

    /// Begin sign-in. Failures are kept as the auth error, not returned.
    pub async fn login(&self) {
        self.update(|s| s.error = None);
        if let Err(e) = self.provider.initiate_login().await {
            error!("Login error: {}", e);
            self.update(|s| s.error = Some(e.to_string()));
        }
    }

    /// Sign out. On failure the user stays signed in and the error is logged.
    pub async fn logout(&self) {
        match self.provider.logout().await {
            Ok(()) => self.update(|s| s.user = None),
            Err(e) => error!("Logout error: {}", e),
        }
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        let subscription = self
            .subscription
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(id) = subscription {
            self.provider.unsubscribe(id);
        }
    }
}
