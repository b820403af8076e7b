//! The `SweetShop` handle shared by everything driving the SDK.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::StatusCode;
use secrecy::SecretString;

use sweetshop_core::{Price, SweetId};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::gateway::{Cart, CartItem, Category, GatewayClient, Sweet, SweetQuery, UserProfile, Wishlist, WishlistItem};
use crate::session::{AuthState, Session};
use crate::store::{FileSessionStore, SessionStore};
use crate::totals;

/// Everything the UI sees: the session plus the local mirrors of the remote
/// cart and wishlist.
#[derive(Default)]
pub(crate) struct ViewState {
    pub auth: AuthState,
    pub cart: Vec<CartItem>,
    pub wishlist: Vec<WishlistItem>,
}

/// Handle to the Sweet Shop client.
///
/// Construct one at process start and pass it (or clones - cloning is an
/// `Arc` bump) to every consumer; there is deliberately no global instance.
/// All mutating operations go through the gateway first and only then touch
/// local state, so the mirrors always hold the gateway's last answer.
///
/// Racing calls are not coordinated: if two mutations overlap, whichever
/// response lands last wins locally. The gateway itself is the ordering
/// authority.
#[derive(Clone)]
pub struct SweetShop {
    inner: Arc<SweetShopInner>,
}

pub(crate) struct SweetShopInner {
    pub gateway: GatewayClient,
    pub store: Box<dyn SessionStore>,
    pub state: RwLock<ViewState>,
}

impl SweetShop {
    /// Create a client with file-backed session persistence under
    /// `config.state_dir`, rehydrating any persisted session synchronously
    /// before returning.
    ///
    /// Rehydration restores the session only; call
    /// [`hydrate`](Self::hydrate) afterwards to pull the cart and wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let store = Box::new(FileSessionStore::new(config.state_dir.clone()));
        Self::with_store(config, store)
    }

    /// Create a client with a caller-supplied session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_store(
        config: &ClientConfig,
        store: Box<dyn SessionStore>,
    ) -> Result<Self, ClientError> {
        let gateway = GatewayClient::new(config)?;

        let mut state = ViewState::default();
        match store.load() {
            Ok(Some(persisted)) => {
                tracing::info!(user = %persisted.profile.email, "restored persisted session");
                state.auth = AuthState::Authenticated(Session::new(
                    persisted.profile,
                    SecretString::from(persisted.token),
                ));
            }
            Ok(None) => {}
            Err(e) => {
                // An unreadable store reads as "logged out"; the next login
                // rewrites it.
                tracing::warn!(error = %e, "could not read persisted session");
            }
        }

        Ok(Self {
            inner: Arc::new(SweetShopInner {
                gateway,
                store,
                state: RwLock::new(state),
            }),
        })
    }

    /// Direct access to the gateway client, for callers that need endpoints
    /// beyond the managed session/cart/wishlist surface.
    #[must_use]
    pub fn gateway(&self) -> &GatewayClient {
        &self.inner.gateway
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Whether a session is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state_read().auth.is_authenticated()
    }

    /// Snapshot of the authentication state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.state_read().auth.clone()
    }

    /// Profile of the signed-in account, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state_read()
            .auth
            .session()
            .map(|session| session.profile().clone())
    }

    /// Snapshot of the cart mirror (the gateway's last answer).
    #[must_use]
    pub fn cart(&self) -> Vec<CartItem> {
        self.state_read().cart.clone()
    }

    /// Snapshot of the wishlist mirror.
    #[must_use]
    pub fn wishlist(&self) -> Vec<WishlistItem> {
        self.state_read().wishlist.clone()
    }

    /// Total value of the cart mirror.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        totals::cart_total(&self.state_read().cart)
    }

    /// Number of units in the cart mirror.
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        totals::cart_item_count(&self.state_read().cart)
    }

    // =========================================================================
    // Catalog (no session required, never cached)
    // =========================================================================

    /// List sweets matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sweets(&self, query: &SweetQuery) -> Result<Vec<Sweet>, ClientError> {
        self.inner
            .gateway
            .list_sweets(query)
            .await
            .map_err(|e| self.absorb_unauthorized(e))
    }

    /// Fetch a single sweet.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweet does not exist or the request fails.
    pub async fn sweet(&self, sweet_id: &SweetId) -> Result<Sweet, ClientError> {
        self.inner
            .gateway
            .get_sweet(sweet_id)
            .await
            .map_err(|e| self.absorb_unauthorized(e))
    }

    /// List categories with live item counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.inner
            .gateway
            .list_categories()
            .await
            .map_err(|e| self.absorb_unauthorized(e))
    }

    // =========================================================================
    // Internal plumbing
    // =========================================================================

    pub(crate) fn session_store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }

    pub(crate) fn state_read(&self) -> RwLockReadGuard<'_, ViewState> {
        // Poisoning only matters if a panic happened mid-write; the state is
        // still structurally valid, so keep serving it.
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state_write(&self) -> RwLockWriteGuard<'_, ViewState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Token of the held session, or `AuthRequired` - the fail-fast check
    /// every cart/wishlist/order operation runs before touching the network.
    pub(crate) fn authed_token(&self) -> Result<SecretString, ClientError> {
        self.state_read()
            .auth
            .session()
            .map(|session| session.token().clone())
            .ok_or(ClientError::AuthRequired)
    }

    /// Replace the cart mirror with the gateway's answer.
    pub(crate) fn replace_cart(&self, cart: Cart) {
        self.state_write().cart = cart.items;
    }

    /// Replace the wishlist mirror with the gateway's answer.
    pub(crate) fn replace_wishlist(&self, wishlist: Wishlist) {
        self.state_write().wishlist = wishlist.items;
    }

    /// Drop the session and both mirrors, and clear the durable entries.
    ///
    /// In-memory state is reset first so the session dies even if the store
    /// cannot be written.
    pub(crate) fn reset_local_session(&self) {
        {
            let mut state = self.state_write();
            state.auth = AuthState::Unauthenticated;
            state.cart.clear();
            state.wishlist.clear();
        }
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
    }

    /// Global 401 handler: a rejected token while a session is held forces
    /// a full local reset. 401s without a held session (e.g. a failed login)
    /// pass through untouched so the caller sees the gateway's own message.
    pub(crate) fn absorb_unauthorized(&self, err: ClientError) -> ClientError {
        if let ClientError::Gateway { status, .. } = &err
            && *status == StatusCode::UNAUTHORIZED
            && self.is_authenticated()
        {
            tracing::warn!("gateway rejected the session token, forcing logout");
            self.reset_local_session();
            return ClientError::SessionExpired;
        }
        err
    }
}
