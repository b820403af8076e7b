//! In-memory session state.

use secrecy::SecretString;

use crate::gateway::UserProfile;

/// An authenticated session: the profile plus the bearer token backing it.
#[derive(Clone)]
pub struct Session {
    profile: UserProfile,
    token: SecretString,
}

impl Session {
    /// Pair a profile with its token.
    #[must_use]
    pub fn new(profile: UserProfile, token: SecretString) -> Self {
        Self { profile, token }
    }

    /// The authenticated account's profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// The bearer token. Crate-internal: only the gateway layer attaches it
    /// to requests.
    pub(crate) const fn token(&self) -> &SecretString {
        &self.token
    }
}

// Manual Debug so the token can never leak through logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("profile", &self.profile)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Authentication state machine.
///
/// ```text
/// Unauthenticated --login/register/social_login--> Authenticating
/// Authenticating  --success--> Authenticated
/// Authenticating  --failure--> Unauthenticated
/// Authenticated   --logout/forced reset--> Unauthenticated
/// ```
///
/// On process start the state is `Authenticated` iff both durable store
/// entries existed and parsed.
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// No session. Cart/wishlist mutations fail fast in this state.
    #[default]
    Unauthenticated,
    /// An auth operation is in flight; UIs show a pending indicator.
    Authenticating,
    /// A session is held and assumed valid until the gateway says otherwise.
    Authenticated(Session),
}

impl AuthState {
    /// Whether a session is currently held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The held session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use sweetshop_core::{Email, UserId, UserRole};

    fn test_session() -> Session {
        Session::new(
            UserProfile {
                id: UserId::new("u-1"),
                name: "Jane".to_string(),
                email: Email::parse("jane@example.com").unwrap(),
                role: UserRole::User,
                avatar: None,
                provider: None,
            },
            SecretString::from("tok-secret"),
        )
    }

    #[test]
    fn test_default_is_unauthenticated() {
        assert!(!AuthState::default().is_authenticated());
        assert!(AuthState::default().session().is_none());
    }

    #[test]
    fn test_authenticated_exposes_session() {
        let state = AuthState::Authenticated(test_session());
        assert!(state.is_authenticated());
        assert_eq!(state.session().unwrap().profile().name, "Jane");
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", test_session());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("tok-secret"));
    }
}
