//! Sweet Shop gateway REST client.
//!
//! # Architecture
//!
//! - Plain JSON over `reqwest`; one method per endpoint
//! - The gateway is the source of truth - cart and wishlist endpoints always
//!   answer with the full current list, and callers replace their local copy
//!   with it
//! - Bearer token attached whenever the caller holds one; nothing here
//!   decides *whether* a token should exist (that is session-manager policy)
//! - No caching: catalog data is fetched per view and discarded
//!
//! # Example
//!
//! ```rust,ignore
//! use sweetshop_client::gateway::{GatewayClient, SweetQuery};
//!
//! let gateway = GatewayClient::new(&config)?;
//!
//! // Browse without a session
//! let sweets = gateway.list_sweets(&SweetQuery::default()).await?;
//!
//! // Mutate the cart with one
//! let cart = gateway.add_to_cart(&token, &sweets[0].id, 2).await?;
//! ```

pub mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;

use sweetshop_core::{Email, OrderId, SweetId};

use crate::config::ClientConfig;
use crate::error::ClientError;

// =============================================================================
// GatewayClient
// =============================================================================

/// HTTP client for the Sweet Shop gateway.
///
/// Cheap to clone; all methods are independent requests with no shared
/// in-flight state, so racing calls are simply resolved by whichever
/// response the caller observes last.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    http: reqwest::Client,
    /// Base URL without the `/api` prefix or a trailing slash.
    base_url: String,
}

impl GatewayClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Network)?;

        let base_url = config.api_url.as_str().trim_end_matches('/').to_string();

        Ok(Self {
            inner: Arc::new(GatewayClientInner { http, base_url }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{path}", self.inner.base_url)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&SecretString>,
    ) -> reqwest::RequestBuilder {
        let mut request = self.inner.http.request(method, self.endpoint(path));
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        request
    }

    /// Send a request and decode the response.
    ///
    /// Non-2xx responses become [`ClientError::Gateway`] carrying the
    /// gateway's `detail` message when present, else `fallback`. The body is
    /// read as text first so parse failures can be logged with context.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();
        let body = response.text().await.map_err(ClientError::Network)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorPayload>(&body)
                .ok()
                .and_then(|payload| payload.detail);
            tracing::debug!(
                status = %status,
                detail = ?detail,
                "gateway returned non-success status"
            );
            return Err(ClientError::Gateway {
                status,
                message: detail.unwrap_or_else(|| fallback.to_string()),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse gateway response"
            );
            ClientError::Parse(e)
        })
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Exchange email + password for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<TokenResponse, ClientError> {
        let request = self
            .request(Method::POST, "/auth/login", None)
            .json(&LoginRequest {
                email: email.clone(),
                password: password.to_string(),
            });
        self.execute(request, "Login failed").await
    }

    /// Create an account and get a token for it in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the request fails.
    #[instrument(skip_all, fields(email = %body.email))]
    pub(crate) async fn register(
        &self,
        body: &RegisterRequest,
    ) -> Result<TokenResponse, ClientError> {
        let request = self.request(Method::POST, "/auth/register", None).json(body);
        self.execute(request, "Registration failed").await
    }

    /// Login (or transparently create an account) via a social identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the identity or the request
    /// fails.
    #[instrument(skip_all, fields(provider = %body.provider, email = %body.email))]
    pub(crate) async fn social_login(
        &self,
        body: &SocialLoginRequest,
    ) -> Result<TokenResponse, ClientError> {
        let request = self
            .request(Method::POST, "/auth/social-login", None)
            .json(body);
        self.execute(request, "Social login failed").await
    }

    /// Fetch the profile behind a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn me(&self, token: &SecretString) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::GET, "/auth/me", Some(token));
        self.execute(request, "Failed to load profile").await
    }

    /// Invalidate a token server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers treat that as
    /// best-effort and clear local state regardless.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &SecretString) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::POST, "/auth/logout", Some(token));
        self.execute(request, "Logout failed").await
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// List sweets matching a query. Filtering and sorting are gateway-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_sweets(&self, query: &SweetQuery) -> Result<Vec<Sweet>, ClientError> {
        let request = self.request(Method::GET, "/sweets/", None).query(query);
        self.execute(request, "Failed to load sweets").await
    }

    /// Fetch a single sweet by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweet does not exist or the request fails.
    #[instrument(skip(self), fields(sweet_id = %sweet_id))]
    pub async fn get_sweet(&self, sweet_id: &SweetId) -> Result<Sweet, ClientError> {
        let request = self.request(Method::GET, &format!("/sweets/{sweet_id}"), None);
        self.execute(request, "Failed to load sweet").await
    }

    /// List all categories with their current item counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let request = self.request(Method::GET, "/categories/", None);
        self.execute(request, "Failed to load categories").await
    }

    // =========================================================================
    // Cart Methods (every response carries the full current cart)
    // =========================================================================

    /// Fetch the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn fetch_cart(&self, token: &SecretString) -> Result<Cart, ClientError> {
        let request = self.request(Method::GET, "/cart/", Some(token));
        self.execute(request, "Failed to load cart").await
    }

    /// Add a sweet to the cart (quantities accumulate server-side).
    ///
    /// # Errors
    ///
    /// Returns an error if stock is insufficient, the sweet is unknown, or
    /// the request fails.
    #[instrument(skip(self, token), fields(sweet_id = %sweet_id, quantity))]
    pub async fn add_to_cart(
        &self,
        token: &SecretString,
        sweet_id: &SweetId,
        quantity: u32,
    ) -> Result<Cart, ClientError> {
        let request = self
            .request(Method::POST, "/cart/add", Some(token))
            .json(&CartAddRequest {
                sweet_id: sweet_id.clone(),
                quantity,
            });
        self.execute(request, "Failed to add to cart").await
    }

    /// Set the quantity of a cart line. A quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is missing, stock is insufficient, or
    /// the request fails.
    #[instrument(skip(self, token), fields(sweet_id = %sweet_id, quantity))]
    pub async fn update_cart_item(
        &self,
        token: &SecretString,
        sweet_id: &SweetId,
        quantity: u32,
    ) -> Result<Cart, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/cart/item/{sweet_id}"), Some(token))
            .json(&CartUpdateRequest { quantity });
        self.execute(request, "Failed to update cart").await
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(sweet_id = %sweet_id))]
    pub async fn remove_cart_item(
        &self,
        token: &SecretString,
        sweet_id: &SweetId,
    ) -> Result<Cart, ClientError> {
        let request = self.request(
            Method::DELETE,
            &format!("/cart/item/{sweet_id}"),
            Some(token),
        );
        self.execute(request, "Failed to remove from cart").await
    }

    /// Empty the cart. Unlike the other cart endpoints this returns an
    /// acknowledgement, not the (now empty) item list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn clear_cart(&self, token: &SecretString) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::DELETE, "/cart/clear", Some(token));
        self.execute(request, "Failed to clear cart").await
    }

    // =========================================================================
    // Wishlist Methods
    // =========================================================================

    /// Fetch the current wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn fetch_wishlist(&self, token: &SecretString) -> Result<Wishlist, ClientError> {
        let request = self.request(Method::GET, "/wishlist/", Some(token));
        self.execute(request, "Failed to load wishlist").await
    }

    /// Save a sweet to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweet is unknown, already saved, or the
    /// request fails.
    #[instrument(skip(self, token), fields(sweet_id = %sweet_id))]
    pub async fn add_to_wishlist(
        &self,
        token: &SecretString,
        sweet_id: &SweetId,
    ) -> Result<Wishlist, ClientError> {
        let request = self.request(
            Method::POST,
            &format!("/wishlist/add/{sweet_id}"),
            Some(token),
        );
        self.execute(request, "Failed to add to wishlist").await
    }

    /// Remove a sweet from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(sweet_id = %sweet_id))]
    pub async fn remove_from_wishlist(
        &self,
        token: &SecretString,
        sweet_id: &SweetId,
    ) -> Result<Wishlist, ClientError> {
        let request = self.request(
            Method::DELETE,
            &format!("/wishlist/remove/{sweet_id}"),
            Some(token),
        );
        self.execute(request, "Failed to remove from wishlist").await
    }

    /// Empty the wishlist. Returns an acknowledgement, not an item list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn clear_wishlist(
        &self,
        token: &SecretString,
    ) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::DELETE, "/wishlist/clear", Some(token));
        self.execute(request, "Failed to clear wishlist").await
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// List the account's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn list_orders(&self, token: &SecretString) -> Result<Vec<Order>, ClientError> {
        let request = self.request(Method::GET, "/orders/", Some(token));
        self.execute(request, "Failed to load orders").await
    }

    /// Place an order from the server-side cart. On success the gateway has
    /// already cleared the cart; callers should re-fetch it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty, stock ran out, or the request
    /// fails.
    #[instrument(skip(self, token, body))]
    pub async fn place_order(
        &self,
        token: &SecretString,
        body: &OrderRequest,
    ) -> Result<Order, ClientError> {
        let request = self.request(Method::POST, "/orders/", Some(token)).json(body);
        self.execute(request, "Failed to place order").await
    }

    /// Fetch one order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the request fails.
    #[instrument(skip(self, token), fields(order_id = %order_id))]
    pub async fn get_order(
        &self,
        token: &SecretString,
        order_id: &OrderId,
    ) -> Result<Order, ClientError> {
        let request = self.request(Method::GET, &format!("/orders/{order_id}"), Some(token));
        self.execute(request, "Failed to load order").await
    }

    /// Cancel a pending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be cancelled or the request
    /// fails.
    #[instrument(skip(self, token), fields(order_id = %order_id))]
    pub async fn cancel_order(
        &self,
        token: &SecretString,
        order_id: &OrderId,
    ) -> Result<Order, ClientError> {
        let request = self.request(
            Method::PATCH,
            &format!("/orders/{order_id}/cancel"),
            Some(token),
        );
        self.execute(request, "Failed to cancel order").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_client(base: &str) -> GatewayClient {
        let config = ClientConfig::new(base.parse().unwrap(), PathBuf::from("/tmp/unused"));
        GatewayClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_api_prefix() {
        let client = test_client("http://localhost:8000");
        assert_eq!(
            client.endpoint("/auth/login"),
            "http://localhost:8000/api/auth/login"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = test_client("http://localhost:8000/");
        assert_eq!(client.endpoint("/cart/"), "http://localhost:8000/api/cart/");
    }
}
