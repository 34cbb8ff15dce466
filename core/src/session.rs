//! Shared "who am I" state.
//!
//! # Design
//! Header, navigation, sidebar and page guards all need the same fact: is
//! there a session, and whose is it. `SessionProvider` answers from one
//! short-lived memo of `/auth/me` instead of letting every consumer poll the
//! backend. Login and logout invalidate the memo explicitly.
//!
//! The lock is never held across a network call. Two callers that miss the
//! memo at the same time may both fetch; the later answer wins. Every
//! invalidation bumps a generation counter, and an answer is only stored if
//! no invalidation happened while it was in flight.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::backend::Backend;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::SessionUser;

/// How long a `/auth/me` answer is reused before it is fetched again.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30);

/// Caller-side view of the authentication status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Nothing known yet, or the memo was invalidated.
    Checking,
    Authorized(SessionUser),
    Unauthenticated,
}

impl AuthStatus {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            AuthStatus::Authorized(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthStatus::Authorized(_))
    }
}

#[derive(Debug)]
struct Memo {
    status: AuthStatus,
    fetched_at: Instant,
}

#[derive(Debug, Default)]
struct State {
    memo: Option<Memo>,
    generation: u64,
}

#[derive(Debug)]
pub struct SessionProvider {
    ttl: Duration,
    state: Mutex<State>,
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionProvider {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(State::default()),
        }
    }

    /// Last known status without touching the network. A stale memo still
    /// answers here; only [`SessionProvider::current`] refreshes.
    pub fn status(&self) -> AuthStatus {
        self.state
            .lock()
            .memo
            .as_ref()
            .map(|memo| memo.status.clone())
            .unwrap_or(AuthStatus::Checking)
    }

    /// The memoized status if still fresh, otherwise a fresh `/auth/me`.
    pub fn current<T: Transport>(&self, backend: &Backend<T>) -> Result<AuthStatus, ApiError> {
        if let Some(memo) = self.state.lock().memo.as_ref() {
            if memo.fetched_at.elapsed() < self.ttl {
                return Ok(memo.status.clone());
            }
        }
        self.refresh(backend)
    }

    /// Ask the backend who the caller is. 401/403 or an empty answer mean
    /// "no session"; any other failure propagates and leaves the memo
    /// untouched.
    pub fn refresh<T: Transport>(&self, backend: &Backend<T>) -> Result<AuthStatus, ApiError> {
        let generation = self.state.lock().generation;
        let status = match backend.me() {
            Ok(Some(response)) => AuthStatus::Authorized(response.user),
            Ok(None) => AuthStatus::Unauthenticated,
            Err(e) if e.is_unauthorized() => AuthStatus::Unauthenticated,
            Err(e) => return Err(e),
        };

        let mut state = self.state.lock();
        if state.generation == generation {
            debug!(authorized = status.is_authorized(), "session refreshed");
            state.memo = Some(Memo {
                status: status.clone(),
                fetched_at: Instant::now(),
            });
        } else {
            debug!("session answer predates an invalidation, not stored");
        }
        Ok(status)
    }

    pub fn invalidate(&self) {
        debug!("session memo invalidated");
        let mut state = self.state.lock();
        state.memo = None;
        state.generation = state.generation.wrapping_add(1);
    }

    /// Log in and drop the memo so the next read sees the new session.
    /// `None` when the server accepted the login without a body.
    pub fn login<T: Transport>(
        &self,
        backend: &Backend<T>,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionUser>, ApiError> {
        let response = backend.login(email, password)?;
        self.invalidate();
        Ok(response.map(|response| response.user))
    }

    /// Log out and drop the memo, even if the backend call fails.
    pub fn logout<T: Transport>(&self, backend: &Backend<T>) -> Result<(), ApiError> {
        let result = backend.logout();
        self.invalidate();
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    use super::*;
    use crate::client::ApiClient;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::types::Role;

    /// Answers `/auth/me` with a fixed response and counts the calls.
    struct FixedMe {
        status: u16,
        body: &'static str,
        calls: AtomicUsize,
    }

    impl FixedMe {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Transport for FixedMe {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            if request.path.ends_with("/auth/me") {
                self.calls.fetch_add(1, Ordering::SeqCst);
            }
            Ok(HttpResponse::new(self.status, self.body))
        }
    }

    fn backend(status: u16, body: &'static str) -> Backend<FixedMe> {
        Backend::new(ApiClient::new("http://api.test"), FixedMe::new(status, body))
    }

    const ADMIN: &str = r#"{"user":{"id":"u1","role":"ADMIN","status":"APPROVED"}}"#;

    #[test]
    fn starts_in_checking() {
        assert_eq!(SessionProvider::default().status(), AuthStatus::Checking);
    }

    #[test]
    fn fresh_memo_is_reused() {
        let backend = backend(200, ADMIN);
        let provider = SessionProvider::new(Duration::from_secs(60));

        let first = provider.current(&backend).unwrap();
        let second = provider.current(&backend).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.user().map(|u| u.role), Some(Role::Admin));
        assert_eq!(backend.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_ttl_always_refetches() {
        let backend = backend(200, ADMIN);
        let provider = SessionProvider::new(Duration::ZERO);

        provider.current(&backend).unwrap();
        provider.current(&backend).unwrap();

        assert_eq!(backend.transport().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let backend = backend(200, ADMIN);
        let provider = SessionProvider::new(Duration::from_secs(60));

        provider.current(&backend).unwrap();
        provider.invalidate();
        assert_eq!(provider.status(), AuthStatus::Checking);
        provider.current(&backend).unwrap();

        assert_eq!(backend.transport().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unauthorized_means_unauthenticated() {
        let backend = backend(401, r#"{"message":"Unauthorized"}"#);
        let provider = SessionProvider::default();

        assert_eq!(provider.current(&backend).unwrap(), AuthStatus::Unauthenticated);
        assert_eq!(provider.status(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn server_errors_propagate_and_keep_memo() {
        let backend = backend(500, "");
        let provider = SessionProvider::default();

        let err = provider.current(&backend).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(provider.status(), AuthStatus::Checking);
    }

    #[test]
    fn logout_invalidates_even_on_failure() {
        let ok = backend(200, ADMIN);
        let provider = SessionProvider::new(Duration::from_secs(60));
        provider.current(&ok).unwrap();

        let failing = backend(500, "");
        assert!(provider.logout(&failing).is_err());
        assert_eq!(provider.status(), AuthStatus::Checking);
    }

    #[test]
    fn login_returns_user_and_invalidates() {
        let backend = backend(200, ADMIN);
        let provider = SessionProvider::new(Duration::from_secs(60));
        provider.current(&backend).unwrap();

        let user = provider.login(&backend, "a@b.c", "pw").unwrap().unwrap();
        assert_eq!(user.id.as_deref(), Some("u1"));
        assert_eq!(provider.status(), AuthStatus::Checking);
    }

    #[test]
    fn empty_me_answer_is_unauthenticated() {
        let backend = backend(204, "");
        let provider = SessionProvider::default();

        assert_eq!(provider.current(&backend).unwrap(), AuthStatus::Unauthenticated);
    }

    /// Holds the first `/auth/me` until released and answers it with 401.
    /// Later calls see the logged-in admin.
    struct SlowFirstMe {
        entered: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
        me_calls: AtomicUsize,
    }

    impl Transport for SlowFirstMe {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            if request.path.ends_with("/auth/me")
                && self.me_calls.fetch_add(1, Ordering::SeqCst) == 0
            {
                self.entered.lock().send(()).unwrap();
                self.release.lock().recv().unwrap();
                return Ok(HttpResponse::new(401, r#"{"message":"Unauthorized"}"#));
            }
            Ok(HttpResponse::new(200, ADMIN))
        }
    }

    #[test]
    fn answer_started_before_login_is_not_stored() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let backend = Backend::new(
            ApiClient::new("http://api.test"),
            SlowFirstMe {
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
                me_calls: AtomicUsize::new(0),
            },
        );
        let provider = SessionProvider::new(Duration::from_secs(60));

        std::thread::scope(|s| {
            let before_login = s.spawn(|| provider.refresh(&backend));
            entered_rx.recv().unwrap();
            provider.login(&backend, "a@b.c", "pw").unwrap();
            release_tx.send(()).unwrap();
            assert_eq!(
                before_login.join().unwrap().unwrap(),
                AuthStatus::Unauthenticated
            );
        });

        assert_eq!(provider.status(), AuthStatus::Checking);
        let status = provider.current(&backend).unwrap();
        assert_eq!(status.user().map(|u| u.role), Some(Role::Admin));
        assert_eq!(backend.transport().me_calls.load(Ordering::SeqCst), 2);
    }
}
