//! Session guard for navigation between views.
//!
//! The guard is the pre-navigation gate enforcing the public/protected view
//! distinction: it classifies each destination, checks the stored session
//! state, and either lets the navigation proceed or redirects it. It also
//! owns the login and logout operations, which write and clear that state.

use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::credentials::{AdminCredential, CredentialStore};
use crate::error::Result;
use crate::storage::{KeyValueStore, ADMIN_KEY, TOKEN_KEY};

/// Named navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page.
    Home,
    /// Administrator login form.
    Login,
    /// Password recovery form.
    PasswordRecovery,
    /// The protected student listing view.
    StudentList,
    /// Catch-all for unknown destinations.
    NotFound,
}

impl Route {
    /// Check if this destination is on the public allow-list.
    ///
    /// Everything not listed here is protected, including the catch-all.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Home | Self::Login | Self::PasswordRecovery)
    }

    /// The route's stable name, as used in logs and the navigation surface.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::PasswordRecovery => "password-recovery",
            Self::StudentList => "student-list",
            Self::NotFound => "not-found",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of evaluating a single navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Proceed to the requested destination unchanged.
    Allowed,
    /// Navigation was intercepted; go to this destination instead.
    Redirected(Route),
}

/// Signal that the session was fully torn down.
///
/// The browser original forced a hard page reload on logout so the guard
/// would re-evaluate from a clean slate. In a terminal context the
/// equivalent is this explicit reset marker, carrying the user-visible
/// confirmation and the view to land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReset {
    /// Confirmation message to show the user.
    pub message: String,
    /// Destination after the reset.
    pub target: Route,
}

/// Transient in-memory binding for the login form.
///
/// Cleared by [`SessionGuard::login`] after a successful submission; never
/// persisted in this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Submitted username.
    pub username: String,
    /// Submitted password.
    pub password: String,
}

/// Pre-navigation gate for protected views.
#[derive(Debug)]
pub struct SessionGuard<'a, S: KeyValueStore> {
    store: &'a S,
    credentials: CredentialStore<'a, S>,
    token_value: String,
}

impl<'a, S: KeyValueStore> SessionGuard<'a, S> {
    /// Create a guard over the given backing storage.
    pub fn new(store: &'a S, auth: &AuthConfig) -> Self {
        Self {
            store,
            credentials: CredentialStore::new(store, auth),
            token_value: auth.token_value.clone(),
        }
    }

    /// Check whether a session is currently authenticated.
    ///
    /// True iff both a non-empty token and an admin credential record are
    /// present in storage. A storage failure fails safe to `false`, with the
    /// underlying cause logged rather than lost.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Token read failed, treating session as unauthenticated");
                return false;
            }
        };

        let admin = match self.store.get(ADMIN_KEY) {
            Ok(admin) => admin,
            Err(err) => {
                warn!(error = %err, "Credential read failed, treating session as unauthenticated");
                return false;
            }
        };

        token.is_some_and(|t| !t.is_empty()) && admin.is_some()
    }

    /// Evaluate a navigation attempt to `destination`.
    ///
    /// Runs synchronously and completes before the navigation is committed.
    /// Seeding of the default credential happens here on every attempt,
    /// matching the lazy initialization the routing layer has always done; a
    /// seeding failure is logged and the evaluation continues.
    #[must_use]
    pub fn evaluate(&self, destination: Route) -> NavigationDecision {
        if let Err(err) = self.credentials.ensure_seeded() {
            warn!(error = %err, "Failed to seed admin credentials during navigation");
        }

        let authenticated = self.is_authenticated();

        if !destination.is_public() && !authenticated {
            debug!(destination = %destination, "User not authenticated, redirecting to login");
            return NavigationDecision::Redirected(Route::Login);
        }

        if destination == Route::Login && authenticated {
            debug!("Already authenticated, redirecting to student list");
            return NavigationDecision::Redirected(Route::StudentList);
        }

        NavigationDecision::Allowed
    }

    /// Pre-navigation hook form of [`evaluate`](Self::evaluate).
    ///
    /// Calls the continuation exactly once: with the original destination
    /// when the navigation is allowed, or with the redirect target otherwise.
    pub fn before_navigate<F>(&self, destination: Route, _origin: Option<Route>, next: F)
    where
        F: FnOnce(Route),
    {
        match self.evaluate(destination) {
            NavigationDecision::Allowed => next(destination),
            NavigationDecision::Redirected(target) => next(target),
        }
    }

    /// Log in with the submitted form and clear it.
    ///
    /// The submitted pair is written wholesale as the new admin credential;
    /// it is NOT verified against the previously stored record. That matches
    /// the behavior this tool has always had and is flagged in DESIGN.md as
    /// a probable logic gap awaiting an owner decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails; the form is left
    /// intact in that case so the user can retry.
    pub fn login(&self, form: &mut LoginForm) -> Result<()> {
        let credential = AdminCredential {
            username: form.username.clone(),
            password: form.password.clone(),
        };
        let serialized = serde_json::to_string(&credential)?;

        self.store.set(ADMIN_KEY, &serialized)?;
        self.store.set(TOKEN_KEY, &self.token_value)?;

        form.username.clear();
        form.password.clear();

        debug!("Login recorded for '{}'", credential.username);
        Ok(())
    }

    /// Log out, clearing all session state.
    ///
    /// Removes both the credential and token entries and returns the
    /// [`SessionReset`] signal for the caller to act on.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn logout(&self) -> Result<SessionReset> {
        self.store.remove(ADMIN_KEY)?;
        self.store.remove(TOKEN_KEY)?;

        Ok(SessionReset {
            message: "Logout successful".to_string(),
            target: Route::Login,
        })
    }
}
