//! Authentication operations and their input types.
//!
//! Social providers hand back differently shaped payloads (Facebook nests
//! the avatar under `picture.data.url`, Google does not); the adapter
//! constructors on [`SocialProfile`] normalize both into one canonical shape
//! before the session manager ever sees them.

use secrecy::{ExposeSecret, SecretString};

use sweetshop_core::{Email, EmailError};

use crate::client::SweetShop;
use crate::error::ClientError;
use crate::gateway::types::{RegisterRequest, SocialLoginRequest};
use crate::gateway::{TokenResponse, UserProfile};
use crate::session::{AuthState, Session};

// =============================================================================
// Input Types
// =============================================================================

/// Supported social identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl std::fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Facebook => write!(f, "facebook"),
        }
    }
}

/// Canonical social identity: what every provider payload is reduced to.
#[derive(Debug, Clone)]
pub struct SocialProfile {
    pub name: String,
    pub email: Email,
    pub avatar_url: Option<String>,
}

/// Raw Google userinfo payload.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoogleUserInfo {
    pub name: String,
    pub email: String,
    /// Avatar URL, flat in Google's shape.
    pub picture: Option<String>,
}

/// Raw Facebook profile payload.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FacebookUserInfo {
    pub name: String,
    pub email: String,
    pub picture: Option<FacebookPicture>,
}

/// Facebook wraps the avatar in a `picture.data.url` envelope.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FacebookPicture {
    pub data: FacebookPictureData,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FacebookPictureData {
    pub url: String,
}

impl SocialProfile {
    /// Normalize a Google payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload's email is not structurally valid.
    pub fn from_google(info: GoogleUserInfo) -> Result<Self, EmailError> {
        Ok(Self {
            name: info.name,
            email: Email::parse(&info.email)?,
            avatar_url: info.picture,
        })
    }

    /// Normalize a Facebook payload, unwrapping the nested avatar envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload's email is not structurally valid.
    pub fn from_facebook(info: FacebookUserInfo) -> Result<Self, EmailError> {
        Ok(Self {
            name: info.name,
            email: Email::parse(&info.email)?,
            avatar_url: info.picture.map(|picture| picture.data.url),
        })
    }
}

/// Sign-up form contents, validated client-side before any network call.
#[derive(Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub avatar: Option<String>,
}

impl NewAccount {
    /// Run the client-side checks and return the parsed email.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` on an empty name, a structurally
    /// invalid email, an empty password, or a confirmation mismatch.
    pub(crate) fn validate(&self) -> Result<Email, ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Validation("Name is required".to_string()));
        }
        let email =
            Email::parse(self.email.trim()).map_err(|e| ClientError::Validation(e.to_string()))?;
        if self.password.is_empty() {
            return Err(ClientError::Validation("Password is required".to_string()));
        }
        if self.password != self.password_confirmation {
            return Err(ClientError::Validation("Passwords do not match".to_string()));
        }
        Ok(email)
    }
}

// =============================================================================
// Auth Operations
// =============================================================================

impl SweetShop {
    /// Sign in with email and password.
    ///
    /// On success the session is persisted, the state machine moves to
    /// `Authenticated`, and the cart/wishlist mirrors are hydrated from the
    /// gateway (hydration failures are logged, not surfaced - the session
    /// stands regardless).
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a structurally invalid email, `Gateway` with
    /// the gateway's message for rejected credentials, `Network` if the
    /// request never completed, or `Store` if the session could not be
    /// persisted (in which case no session is kept).
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let email = Email::parse(email.trim()).map_err(|e| ClientError::Validation(e.to_string()))?;

        self.begin_authenticating();
        let result = self.gateway().login(&email, password).await;
        self.finish_auth(result).await
    }

    /// Create an account and sign into it.
    ///
    /// Client-side validation (including the password confirmation check)
    /// runs before any network call. Success behaves exactly like
    /// [`login`](Self::login) success.
    ///
    /// # Errors
    ///
    /// As [`login`](Self::login), plus `Validation` for any failed
    /// client-side check.
    pub async fn register(&self, account: NewAccount) -> Result<UserProfile, ClientError> {
        let email = account.validate()?;

        self.begin_authenticating();
        let body = RegisterRequest {
            name: account.name.trim().to_string(),
            email,
            password: account.password,
            avatar: account.avatar,
        };
        let result = self.gateway().register(&body).await;
        self.finish_auth(result).await
    }

    /// Sign in through a social identity provider.
    ///
    /// Callers normalize the provider payload first via
    /// [`SocialProfile::from_google`] / [`SocialProfile::from_facebook`].
    /// The gateway creates the account on first sight of the email.
    ///
    /// # Errors
    ///
    /// As [`login`](Self::login).
    pub async fn social_login(
        &self,
        provider: SocialProvider,
        profile: SocialProfile,
    ) -> Result<UserProfile, ClientError> {
        self.begin_authenticating();
        let body = SocialLoginRequest {
            provider: provider.to_string(),
            name: profile.name,
            email: profile.email,
            avatar: profile.avatar_url,
        };
        let result = self.gateway().social_login(&body).await;
        self.finish_auth(result).await
    }

    /// Sign out.
    ///
    /// Remote token invalidation is best-effort: its failure is logged and
    /// otherwise ignored, because the local session must die regardless.
    /// Afterwards the state is always `Unauthenticated` with empty mirrors
    /// and cleared durable entries.
    pub async fn logout(&self) {
        let token = self
            .state_read()
            .auth
            .session()
            .map(|session| session.token().clone());

        if let Some(token) = token
            && let Err(e) = self.gateway().logout(&token).await
        {
            tracing::warn!(error = %e, "remote logout failed, clearing local session anyway");
        }

        self.reset_local_session();
    }

    /// Re-fetch the signed-in account's profile and refresh the persisted
    /// copy.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, otherwise the usual gateway
    /// errors.
    pub async fn refresh_profile(&self) -> Result<UserProfile, ClientError> {
        let token = self.authed_token()?;

        match self.gateway().me(&token).await {
            Ok(profile) => {
                if let Err(e) = self.session_store().save(token.expose_secret(), &profile) {
                    tracing::warn!(error = %e, "failed to persist refreshed profile");
                }
                let mut state = self.state_write();
                if state.auth.is_authenticated() {
                    state.auth =
                        AuthState::Authenticated(Session::new(profile.clone(), token.clone()));
                }
                Ok(profile)
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    // =========================================================================
    // Transition helpers
    // =========================================================================

    /// Enter `Authenticating` for the duration of an auth attempt. An
    /// already-held session stays in place until the new grant lands, so a
    /// failed re-login does not log the user out.
    fn begin_authenticating(&self) {
        let mut state = self.state_write();
        if !state.auth.is_authenticated() {
            state.auth = AuthState::Authenticating;
        }
    }

    /// Roll an in-flight auth attempt back to `Unauthenticated`.
    fn abort_authenticating(&self) {
        let mut state = self.state_write();
        if matches!(state.auth, AuthState::Authenticating) {
            state.auth = AuthState::Unauthenticated;
        }
    }

    async fn finish_auth(
        &self,
        result: Result<TokenResponse, ClientError>,
    ) -> Result<UserProfile, ClientError> {
        match result {
            Ok(grant) => self.install_session(grant).await,
            Err(err) => {
                self.abort_authenticating();
                Err(err)
            }
        }
    }

    /// Persist and install a fresh session, then hydrate the mirrors.
    ///
    /// Persisting comes first: if the durable entries cannot be written the
    /// attempt is rolled back, keeping "authenticated" equivalent to "both
    /// entries exist".
    async fn install_session(&self, grant: TokenResponse) -> Result<UserProfile, ClientError> {
        if let Err(e) = self.session_store().save(&grant.access_token, &grant.user) {
            self.abort_authenticating();
            return Err(ClientError::Store(e));
        }

        let profile = grant.user.clone();
        {
            let mut state = self.state_write();
            state.auth = AuthState::Authenticated(Session::new(
                grant.user,
                SecretString::from(grant.access_token),
            ));
            // The mirrors belong to the previous session (if any) until
            // hydration refills them.
            state.cart.clear();
            state.wishlist.clear();
        }
        tracing::info!(user = %profile.email, "signed in");

        // Soft failure: the session stands even if the mirrors stay empty.
        if let Err(e) = self.hydrate().await {
            tracing::warn!(error = %e, "failed to hydrate cart/wishlist after sign-in");
        }

        Ok(profile)
    }
}
