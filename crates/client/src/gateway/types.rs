//! Wire types for the Sweet Shop gateway.
//!
//! Field names match the gateway's snake_case JSON exactly, so these derive
//! straight through serde with no rename layer. The client treats every
//! server-owned entity as read-only: responses are stored or displayed, never
//! edited field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sweetshop_core::{CategoryId, Email, OrderId, OrderStatus, Price, SweetId, UserId, UserRole};

// =============================================================================
// Auth
// =============================================================================

/// Account profile as the gateway reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
    /// Account role.
    pub role: UserRole,
    /// Avatar image URL, if the account has one.
    pub avatar: Option<String>,
    /// Identity provider that created the account (`email`, `google`, ...).
    pub provider: Option<String>,
}

/// Successful response of the three auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token scheme, always `bearer`.
    pub token_type: String,
    /// Profile of the authenticated account.
    pub user: UserProfile,
}

// No Debug on the password-bearing requests: they exist to be serialized
// onto the wire, never logged.
#[derive(Serialize)]
pub(crate) struct LoginRequest {
    pub email: Email,
    pub password: String,
}

#[derive(Serialize)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: Email,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SocialLoginRequest {
    pub provider: String,
    pub name: String,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// A catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweet {
    pub id: SweetId,
    pub name: String,
    pub category: String,
    pub price: Price,
    /// Pre-discount price, when the item is on offer.
    pub original_price: Option<Price>,
    pub description: String,
    /// Image URL.
    pub image: String,
    pub stock: u32,
    /// Display weight (e.g. "250g", "1kg box").
    pub weight: String,
    /// Ordered ingredient list.
    pub ingredients: Vec<String>,
    pub featured: bool,
    pub rating: f64,
    pub reviews: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog category with its item count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Emoji or icon identifier for the category tile.
    pub icon: String,
    pub description: Option<String>,
    /// Number of sweets currently in the category.
    pub count: u32,
    pub created_at: DateTime<Utc>,
}

/// Sort key accepted by `GET /sweets/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Name,
    Price,
    Rating,
    CreatedAt,
}

/// Sort direction accepted by `GET /sweets/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query parameters for `GET /sweets/`.
///
/// Filtering and sorting happen gateway-side; the client just forwards
/// whatever subset of parameters the caller set.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SweetQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Substring match against name and description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// Pagination offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Pagination page size (gateway caps at 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the remote cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub sweet_id: SweetId,
    pub quantity: u32,
    /// Unit price captured when the line was added.
    pub price: Price,
    pub name: String,
    pub image: String,
    pub weight: String,
}

/// The remote cart, returned in full by every cart endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Cart {
    pub id: String,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    /// Gateway-computed total; the client recomputes its own from `items`.
    pub total: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CartAddRequest {
    pub sweet_id: SweetId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CartUpdateRequest {
    pub quantity: u32,
}

// =============================================================================
// Wishlist
// =============================================================================

/// One saved sweet on the remote wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub sweet_id: SweetId,
    pub name: String,
    pub image: String,
    pub price: Price,
    pub added_at: DateTime<Utc>,
}

/// The remote wishlist, returned in full by every wishlist endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Wishlist {
    pub id: String,
    pub user_id: UserId,
    pub items: Vec<WishlistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of a placed order (snapshot of the cart line at checkout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub sweet_id: SweetId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
    pub image: String,
}

/// A placed order.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total: Price,
    pub status: OrderStatus,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checkout details for `POST /orders/`. The order's lines come from the
/// server-side cart, not from the request.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub address: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// Shared
// =============================================================================

/// Plain acknowledgement returned by logout and the clear endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

/// Error body the gateway attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub detail: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sweet_query_serializes_only_set_fields() {
        let query = SweetQuery {
            category: Some("chocolates".to_string()),
            sort_by: Some(SortBy::Price),
            sort_order: Some(SortOrder::Desc),
            ..SweetQuery::default()
        };
        let encoded = serde_json::to_value(&query).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "category": "chocolates",
                "sort_by": "price",
                "sort_order": "desc",
            })
        );
    }

    #[test]
    fn test_cart_deserializes_gateway_shape() {
        let cart: Cart = serde_json::from_str(
            r#"{
                "id": "c-1",
                "user_id": "u-1",
                "items": [
                    {
                        "sweet_id": "s-1",
                        "quantity": 2,
                        "price": 25.0,
                        "name": "Gulab Jamun",
                        "image": "https://img.example/gj.jpg",
                        "weight": "500g"
                    }
                ],
                "total": 50.0,
                "created_at": "2026-01-05T10:00:00Z",
                "updated_at": "2026-01-05T10:05:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.total, Price::from_units(50));
    }

    #[test]
    fn test_error_payload_detail_is_optional() {
        let payload: ErrorPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.detail.is_none());

        let payload: ErrorPayload =
            serde_json::from_str(r#"{"detail": "Sweet not found"}"#).unwrap();
        assert_eq!(payload.detail.as_deref(), Some("Sweet not found"));
    }
}
