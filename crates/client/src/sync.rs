//! Cart and wishlist synchronization, plus orders.
//!
//! Every mutation here follows the same shape: fail fast without a session,
//! call the gateway, and on success replace the whole local mirror with the
//! item list the gateway returned. There is no optimistic update - the
//! mirror changes only when the authoritative answer arrives - and on
//! failure the mirror is left exactly as it was.
//!
//! Overlapping calls are not serialized; the mirror ends up holding whichever
//! response arrived last (accepted limitation, the gateway orders writes).

use sweetshop_core::{OrderId, SweetId};

use crate::client::SweetShop;
use crate::error::ClientError;
use crate::gateway::{Order, OrderRequest};

impl SweetShop {
    // =========================================================================
    // Hydration
    // =========================================================================

    /// Fetch the current cart and wishlist and replace both mirrors.
    ///
    /// Runs automatically after every successful sign-in; also useful when
    /// an embedder wants to re-sync after its own gateway calls.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, otherwise the usual gateway
    /// errors. On failure the mirrors keep their previous contents.
    pub async fn hydrate(&self) -> Result<(), ClientError> {
        let token = self.authed_token()?;

        let cart = self
            .gateway()
            .fetch_cart(&token)
            .await
            .map_err(|e| self.absorb_unauthorized(e))?;
        self.replace_cart(cart);

        let wishlist = self
            .gateway()
            .fetch_wishlist(&token)
            .await
            .map_err(|e| self.absorb_unauthorized(e))?;
        self.replace_wishlist(wishlist);

        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of a sweet to the cart. Quantities for a sweet
    /// already in the cart accumulate server-side.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session (no network call is made),
    /// or the gateway's error (e.g. "Not enough stock available") with the
    /// mirror untouched.
    pub async fn add_to_cart(&self, sweet_id: &SweetId, quantity: u32) -> Result<(), ClientError> {
        let token = self.authed_token()?;
        match self.gateway().add_to_cart(&token, sweet_id, quantity).await {
            Ok(cart) => {
                self.replace_cart(cart);
                Ok(())
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    /// Set a cart line to an exact quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// As [`add_to_cart`](Self::add_to_cart).
    pub async fn update_cart_quantity(
        &self,
        sweet_id: &SweetId,
        quantity: u32,
    ) -> Result<(), ClientError> {
        let token = self.authed_token()?;
        match self
            .gateway()
            .update_cart_item(&token, sweet_id, quantity)
            .await
        {
            Ok(cart) => {
                self.replace_cart(cart);
                Ok(())
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    /// Remove a sweet from the cart.
    ///
    /// # Errors
    ///
    /// As [`add_to_cart`](Self::add_to_cart).
    pub async fn remove_from_cart(&self, sweet_id: &SweetId) -> Result<(), ClientError> {
        let token = self.authed_token()?;
        match self.gateway().remove_cart_item(&token, sweet_id).await {
            Ok(cart) => {
                self.replace_cart(cart);
                Ok(())
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    /// Empty the cart.
    ///
    /// The clear endpoint acknowledges instead of returning an item list, so
    /// the mirror is emptied only after the gateway confirms.
    ///
    /// # Errors
    ///
    /// As [`add_to_cart`](Self::add_to_cart).
    pub async fn clear_cart(&self) -> Result<(), ClientError> {
        let token = self.authed_token()?;
        match self.gateway().clear_cart(&token).await {
            Ok(_ack) => {
                self.state_write().cart.clear();
                Ok(())
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Save a sweet to the wishlist.
    ///
    /// # Errors
    ///
    /// As [`add_to_cart`](Self::add_to_cart); the gateway rejects
    /// duplicates with "Item already in wishlist".
    pub async fn add_to_wishlist(&self, sweet_id: &SweetId) -> Result<(), ClientError> {
        let token = self.authed_token()?;
        match self.gateway().add_to_wishlist(&token, sweet_id).await {
            Ok(wishlist) => {
                self.replace_wishlist(wishlist);
                Ok(())
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    /// Remove a sweet from the wishlist.
    ///
    /// # Errors
    ///
    /// As [`add_to_cart`](Self::add_to_cart).
    pub async fn remove_from_wishlist(&self, sweet_id: &SweetId) -> Result<(), ClientError> {
        let token = self.authed_token()?;
        match self.gateway().remove_from_wishlist(&token, sweet_id).await {
            Ok(wishlist) => {
                self.replace_wishlist(wishlist);
                Ok(())
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    /// Empty the wishlist. Mirror semantics as [`clear_cart`](Self::clear_cart).
    ///
    /// # Errors
    ///
    /// As [`add_to_cart`](Self::add_to_cart).
    pub async fn clear_wishlist(&self) -> Result<(), ClientError> {
        let token = self.authed_token()?;
        match self.gateway().clear_wishlist(&token).await {
            Ok(_ack) => {
                self.state_write().wishlist.clear();
                Ok(())
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List the account's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, otherwise gateway errors.
    pub async fn orders(&self) -> Result<Vec<Order>, ClientError> {
        let token = self.authed_token()?;
        self.gateway()
            .list_orders(&token)
            .await
            .map_err(|e| self.absorb_unauthorized(e))
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// As [`orders`](Self::orders).
    pub async fn order(&self, order_id: &OrderId) -> Result<Order, ClientError> {
        let token = self.authed_token()?;
        self.gateway()
            .get_order(&token, order_id)
            .await
            .map_err(|e| self.absorb_unauthorized(e))
    }

    /// Place an order from the current server-side cart.
    ///
    /// The gateway empties the cart as part of a successful checkout, so the
    /// cart mirror is emptied with it.
    ///
    /// # Errors
    ///
    /// As [`orders`](Self::orders); the gateway rejects an empty cart or
    /// insufficient stock with a descriptive message.
    pub async fn place_order(&self, details: OrderRequest) -> Result<Order, ClientError> {
        let token = self.authed_token()?;
        match self.gateway().place_order(&token, &details).await {
            Ok(order) => {
                self.state_write().cart.clear();
                Ok(order)
            }
            Err(err) => Err(self.absorb_unauthorized(err)),
        }
    }

    /// Cancel a pending order.
    ///
    /// # Errors
    ///
    /// As [`orders`](Self::orders).
    pub async fn cancel_order(&self, order_id: &OrderId) -> Result<Order, ClientError> {
        let token = self.authed_token()?;
        self.gateway()
            .cancel_order(&token, order_id)
            .await
            .map_err(|e| self.absorb_unauthorized(e))
    }
}
