// src/session.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Auth/session state passed explicitly to data-access calls.
///
/// Cheap to clone; all clones share the same token cell, so a token stored
/// by the auth service is visible to every service holding the context.
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

#[derive(Default)]
struct SessionInner {
    token: RwLock<Option<String>>,
    login_required: AtomicBool,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session pre-seeded with a bearer token (e.g. read from a cookie).
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.inner.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.into());
        self.inner.login_required.store(false, Ordering::SeqCst);
    }

    pub fn bearer_token(&self) -> Option<String> {
        let guard = self.inner.token.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    pub fn clear(&self) {
        let mut guard = self.inner.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// Invoked on a 401: drops the token and flags the session so the UI
    /// performs a hard redirect to the login route.
    pub fn handle_unauthorized(&self) {
        self.clear();
        self.inner.login_required.store(true, Ordering::SeqCst);
    }

    /// True once a 401 has forced re-authentication. Resets on the next
    /// `set_token`.
    pub fn login_required(&self) -> bool {
        self.inner.login_required.load(Ordering::SeqCst)
    }
}
