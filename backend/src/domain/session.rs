//! Admin session lifecycle.
//!
//! The session is either anonymous or authenticated. A successful login
//! stores `{user, expiresAt}` through the [`SessionStore`] port with a fixed
//! 24 hour lifetime. Expiry is checked passively: only [`AuthService::restore`]
//! compares the stored deadline with the clock, so a session that expires
//! while the process runs stays authenticated until the next restore.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ports::{AdminRepository, RepositoryError, SessionStore};
use super::{AdminUser, Error, LoginCredentials};

/// Lifetime of a session from the moment of login.
pub const SESSION_TTL: TimeDelta = TimeDelta::hours(24);

/// Message shown when the username or password does not match.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

/// Message shown when login fails for any other reason.
pub const UNEXPECTED_LOGIN_MESSAGE: &str = "Something went wrong. Please try again.";

/// Persisted session payload.
///
/// `expires_at` is in milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub user: AdminUser,
    pub expires_at: i64,
}

impl StoredSession {
    /// Session for `user` expiring [`SESSION_TTL`] after `now`.
    pub fn starting_at(user: AdminUser, now: DateTime<Utc>) -> Self {
        Self {
            user,
            expires_at: (now + SESSION_TTL).timestamp_millis(),
        }
    }

    /// Whether the deadline has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp_millis()
    }
}

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(StoredSession),
}

impl SessionState {
    /// The signed-in admin, if any.
    pub fn user(&self) -> Option<&AdminUser> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(session) => Some(&session.user),
        }
    }
}

/// Authenticates admins and owns the session state.
pub struct AuthService {
    admins: Arc<dyn AdminRepository>,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<SessionState>,
}

impl AuthService {
    /// Create an anonymous service. Call [`AuthService::restore`] to pick up a
    /// stored session.
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            admins,
            sessions,
            clock,
            state: Mutex::new(SessionState::Anonymous),
        }
    }

    /// Load the stored session and apply the expiry check.
    ///
    /// An unexpired session is trusted as stored without contacting the admin
    /// repository. Expired or unreadable payloads are cleared.
    pub async fn restore(&self) -> SessionState {
        let restored = match self.sessions.load().await {
            Ok(Some(session)) if !session.is_expired_at(self.clock.utc()) => {
                SessionState::Authenticated(session)
            }
            Ok(Some(session)) => {
                info!(username = %session.user.username, "stored session expired");
                self.discard_stored().await;
                SessionState::Anonymous
            }
            Ok(None) => SessionState::Anonymous,
            Err(error) => {
                warn!(%error, "discarding unreadable session");
                self.discard_stored().await;
                SessionState::Anonymous
            }
        };
        *self.lock_state() = restored.clone();
        restored
    }

    /// Authenticate and start a session.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCode::Unauthorized`](super::ErrorCode::Unauthorized)
    /// error when the credentials do not match and an
    /// [`ErrorCode::InternalError`](super::ErrorCode::InternalError) error
    /// for any other failure. The state stays anonymous in both cases.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, Error> {
        let credentials = match LoginCredentials::try_from_parts(username, password) {
            Ok(credentials) => credentials,
            Err(error) => {
                warn!(%error, "login rejected");
                return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
            }
        };

        let user = match self
            .admins
            .authenticate(credentials.username(), credentials.password())
            .await
        {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(username = credentials.username(), "login rejected");
                return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
            }
            Err(error) => {
                warn!(%error, "login failed");
                return Err(Error::internal(UNEXPECTED_LOGIN_MESSAGE));
            }
        };

        let session = StoredSession::starting_at(user.clone(), self.clock.utc());
        if let Err(error) = self.sessions.save(&session).await {
            warn!(%error, "failed to persist session");
            return Err(Error::internal(UNEXPECTED_LOGIN_MESSAGE));
        }

        info!(username = %user.username, role = %user.role, "admin signed in");
        *self.lock_state() = SessionState::Authenticated(session);
        Ok(user)
    }

    /// End the session and clear storage.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the stored payload cannot be removed;
    /// the in-memory state is anonymous regardless.
    pub async fn logout(&self) -> Result<(), Error> {
        *self.lock_state() = SessionState::Anonymous;
        self.sessions.clear().await.map_err(|error| {
            warn!(%error, "failed to clear session");
            Error::internal(UNEXPECTED_LOGIN_MESSAGE)
        })
    }

    /// Current state without touching storage.
    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    /// The signed-in admin, if any.
    pub fn current_user(&self) -> Option<AdminUser> {
        self.lock_state().user().cloned()
    }

    /// Whether no admin account exists yet.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn needs_setup(&self) -> Result<bool, RepositoryError> {
        Ok(!self.admins.has_any().await?)
    }

    async fn discard_stored(&self) {
        if let Err(error) = self.sessions.clear().await {
            warn!(%error, "failed to clear stored session");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for session lifecycle decisions.

    use super::*;
    use crate::domain::ports::{MockAdminRepository, MockSessionStore, SessionStoreError};
    use crate::domain::{AdminId, AdminRole, ErrorCode};
    use crate::test_support::FixtureClock;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn admin() -> AdminUser {
        AdminUser {
            id: AdminId::new("admin-1"),
            username: "admin".to_owned(),
            email: "admin@platesnap.com".to_owned(),
            display_name: "Administrator".to_owned(),
            role: AdminRole::Superadmin,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            last_login_at: None,
        }
    }

    fn service(
        admins: MockAdminRepository,
        sessions: MockSessionStore,
        now: DateTime<Utc>,
    ) -> AuthService {
        AuthService::new(
            Arc::new(admins),
            Arc::new(sessions),
            Arc::new(FixtureClock::new(now)),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn login_saves_session_with_fixed_lifetime(now: DateTime<Utc>, admin: AdminUser) {
        let mut admins = MockAdminRepository::new();
        let returned = admin.clone();
        admins
            .expect_authenticate()
            .withf(|username, password| username == "admin" && password == "admin123")
            .times(1)
            .return_once(move |_, _| Ok(Some(returned)));
        let mut sessions = MockSessionStore::new();
        let expected_deadline = (now + TimeDelta::hours(24)).timestamp_millis();
        sessions
            .expect_save()
            .withf(move |session| session.expires_at == expected_deadline)
            .times(1)
            .return_once(|_| Ok(()));

        let auth = service(admins, sessions, now);
        let user = auth.login("admin", "admin123").await.expect("login succeeds");

        assert_eq!(user, admin);
        assert_eq!(auth.current_user(), Some(admin));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_credentials_report_generic_message(now: DateTime<Utc>) {
        let mut admins = MockAdminRepository::new();
        admins
            .expect_authenticate()
            .times(1)
            .return_once(|_, _| Ok(None));
        let auth = service(admins, MockSessionStore::new(), now);

        let err = auth.login("admin", "wrongpass").await.expect_err("no match");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(auth.state(), SessionState::Anonymous);
    }

    #[rstest]
    #[case("", "admin123")]
    #[case("  ", "admin123")]
    #[case("admin", "")]
    #[tokio::test]
    async fn blank_input_never_reaches_repository(
        now: DateTime<Utc>,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let mut admins = MockAdminRepository::new();
        admins.expect_authenticate().never();
        let auth = service(admins, MockSessionStore::new(), now);

        let err = auth.login(username, password).await.expect_err("no match");
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_reports_unexpected_message(now: DateTime<Utc>) {
        let mut admins = MockAdminRepository::new();
        admins
            .expect_authenticate()
            .return_once(|_, _| Err(RepositoryError::connection("offline")));
        let auth = service(admins, MockSessionStore::new(), now);

        let err = auth.login("admin", "admin123").await.expect_err("fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), UNEXPECTED_LOGIN_MESSAGE);
        assert!(auth.current_user().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn restore_trusts_unexpired_session(now: DateTime<Utc>, admin: AdminUser) {
        let stored = StoredSession::starting_at(admin.clone(), now - TimeDelta::hours(23));
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_load()
            .return_once(move || Ok(Some(stored)));
        sessions.expect_clear().never();
        let mut admins = MockAdminRepository::new();
        admins.expect_find_by_id().never();
        let auth = service(admins, sessions, now);

        let state = auth.restore().await;

        assert_eq!(state.user(), Some(&admin));
    }

    #[rstest]
    #[tokio::test]
    async fn restore_clears_session_at_deadline(now: DateTime<Utc>, admin: AdminUser) {
        let stored = StoredSession::starting_at(admin, now - SESSION_TTL);
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_load()
            .return_once(move || Ok(Some(stored)));
        sessions.expect_clear().times(1).return_once(|| Ok(()));
        let auth = service(MockAdminRepository::new(), sessions, now);

        assert_eq!(auth.restore().await, SessionState::Anonymous);
    }

    #[rstest]
    #[tokio::test]
    async fn restore_clears_unreadable_session(now: DateTime<Utc>) {
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_load()
            .return_once(|| Err(SessionStoreError::corrupt("expected value")));
        sessions.expect_clear().times(1).return_once(|| Ok(()));
        let auth = service(MockAdminRepository::new(), sessions, now);

        assert_eq!(auth.restore().await, SessionState::Anonymous);
    }

    #[rstest]
    #[case(true, false)]
    #[case(false, true)]
    #[tokio::test]
    async fn needs_setup_mirrors_admin_presence(
        now: DateTime<Utc>,
        #[case] has_any: bool,
        #[case] expected: bool,
    ) {
        let mut admins = MockAdminRepository::new();
        admins.expect_has_any().return_once(move || Ok(has_any));
        let auth = service(admins, MockSessionStore::new(), now);

        assert_eq!(auth.needs_setup().await.expect("query succeeds"), expected);
    }
}
