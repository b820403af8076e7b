//! End-to-end cart/wishlist synchronization tests against the stub gateway.

#![allow(clippy::unwrap_used)]

use sweetshop_integration_tests::TestContext;

use sweetshop_client::gateway::OrderRequest;
use sweetshop_client::ClientError;
use sweetshop_core::{OrderStatus, Price, SweetId};

/// Seed a signed-in context with one known sweet.
async fn signed_in_with_sweet(price: f64, stock: u32) -> (TestContext, SweetId) {
    let ctx = TestContext::new().await;
    let sweet_id = ctx.stub.seed_sweet("Gulab Jamun", "traditional", price, stock);
    ctx.stub.seed_user("Jane", "jane@example.com", "hunter2");
    ctx.shop.login("jane@example.com", "hunter2").await.unwrap();
    (ctx, SweetId::new(sweet_id))
}

#[tokio::test]
async fn test_add_to_cart_mirrors_gateway_items_wholesale() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;

    ctx.shop.add_to_cart(&sweet_id, 2).await.unwrap();

    let cart = ctx.shop.cart();
    assert_eq!(cart.len(), 1);
    let line = cart.first().unwrap();
    assert_eq!(line.sweet_id, sweet_id);
    assert_eq!(line.quantity, 2);
    assert_eq!(line.price, Price::from_units(25));

    assert_eq!(ctx.shop.cart_total(), Price::from_units(50));
    assert_eq!(ctx.shop.cart_item_count(), 2);
}

#[tokio::test]
async fn test_add_to_cart_while_unauthenticated_fails_without_network() {
    let ctx = TestContext::new().await;
    let sweet_id = SweetId::new(ctx.stub.seed_sweet("Barfi", "traditional", 30.0, 5));
    let before = ctx.stub.request_count();

    let err = ctx.shop.add_to_cart(&sweet_id, 1).await.unwrap_err();

    assert!(matches!(err, ClientError::AuthRequired));
    assert_eq!(ctx.stub.request_count(), before);
    assert!(ctx.shop.cart().is_empty());
}

#[tokio::test]
async fn test_repeated_adds_accumulate_server_side() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;

    ctx.shop.add_to_cart(&sweet_id, 2).await.unwrap();
    ctx.shop.add_to_cart(&sweet_id, 3).await.unwrap();

    let cart = ctx.shop.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.first().unwrap().quantity, 5);
}

#[tokio::test]
async fn test_update_and_remove_replace_the_mirror() {
    let (ctx, jamun) = signed_in_with_sweet(25.0, 10).await;
    let katli = SweetId::new(ctx.stub.seed_sweet("Kaju Katli", "traditional", 45.0, 10));

    ctx.shop.add_to_cart(&jamun, 2).await.unwrap();
    ctx.shop.add_to_cart(&katli, 1).await.unwrap();
    assert_eq!(ctx.shop.cart_total(), Price::from_units(95));

    ctx.shop.update_cart_quantity(&jamun, 4).await.unwrap();
    assert_eq!(ctx.shop.cart_item_count(), 5);

    ctx.shop.remove_from_cart(&katli).await.unwrap();
    let cart = ctx.shop.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.first().unwrap().sweet_id, jamun);
    assert_eq!(ctx.shop.cart_total(), Price::from_units(100));
}

#[tokio::test]
async fn test_update_to_zero_drops_the_line() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;
    ctx.shop.add_to_cart(&sweet_id, 2).await.unwrap();

    ctx.shop.update_cart_quantity(&sweet_id, 0).await.unwrap();
    assert!(ctx.shop.cart().is_empty());
}

#[tokio::test]
async fn test_failed_mutation_leaves_mirror_untouched() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 3).await;
    ctx.shop.add_to_cart(&sweet_id, 2).await.unwrap();
    let before = ctx.shop.cart();

    // Stock is 3; asking for 100 more must fail with the gateway's message.
    let err = ctx.shop.add_to_cart(&sweet_id, 100).await.unwrap_err();
    assert_eq!(err.to_string(), "Not enough stock available");

    assert_eq!(ctx.shop.cart(), before);
    assert_eq!(ctx.shop.cart_item_count(), 2);
}

#[tokio::test]
async fn test_clear_cart_empties_mirror_after_ack() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;
    ctx.shop.add_to_cart(&sweet_id, 2).await.unwrap();

    ctx.shop.clear_cart().await.unwrap();
    assert!(ctx.shop.cart().is_empty());
    assert_eq!(ctx.shop.cart_total(), Price::ZERO);
}

#[tokio::test]
async fn test_wishlist_add_and_remove_mirror_wholesale() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;

    ctx.shop.add_to_wishlist(&sweet_id).await.unwrap();
    let wishlist = ctx.shop.wishlist();
    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist.first().unwrap().sweet_id, sweet_id);

    ctx.shop.remove_from_wishlist(&sweet_id).await.unwrap();
    assert!(ctx.shop.wishlist().is_empty());
}

#[tokio::test]
async fn test_wishlist_rejects_duplicates_with_gateway_message() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;

    ctx.shop.add_to_wishlist(&sweet_id).await.unwrap();
    let err = ctx.shop.add_to_wishlist(&sweet_id).await.unwrap_err();

    assert_eq!(err.to_string(), "Item already in wishlist");
    assert_eq!(ctx.shop.wishlist().len(), 1);
}

#[tokio::test]
async fn test_wishlist_mutations_require_a_session() {
    let ctx = TestContext::new().await;
    let sweet_id = SweetId::new(ctx.stub.seed_sweet("Barfi", "traditional", 30.0, 5));
    let before = ctx.stub.request_count();

    let err = ctx.shop.add_to_wishlist(&sweet_id).await.unwrap_err();
    assert!(matches!(err, ClientError::AuthRequired));
    assert_eq!(ctx.stub.request_count(), before);
}

#[tokio::test]
async fn test_hydrate_pulls_both_mirrors() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;
    ctx.shop.add_to_cart(&sweet_id, 2).await.unwrap();
    ctx.shop.add_to_wishlist(&sweet_id).await.unwrap();

    // A second client over the same session starts with empty mirrors until
    // it hydrates.
    let restarted = sweetshop_client::SweetShop::new(&ctx.config()).unwrap();
    assert!(restarted.cart().is_empty());

    restarted.hydrate().await.unwrap();
    assert_eq!(restarted.cart_item_count(), 2);
    assert_eq!(restarted.wishlist().len(), 1);
}

#[tokio::test]
async fn test_place_order_snapshots_cart_and_empties_it() {
    let (ctx, sweet_id) = signed_in_with_sweet(25.0, 10).await;
    ctx.shop.add_to_cart(&sweet_id, 2).await.unwrap();

    let order = ctx
        .shop
        .place_order(OrderRequest {
            address: "12 Fudge Lane".to_string(),
            phone: "5550123".to_string(),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, Price::from_units(50));
    assert_eq!(order.items.len(), 1);

    // Checkout consumed the server-side cart; the mirror follows.
    assert!(ctx.shop.cart().is_empty());

    let orders = ctx.shop.orders().await.unwrap();
    assert_eq!(orders.len(), 1);

    let cancelled = ctx.shop.cancel_order(&order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn test_place_order_with_empty_cart_is_rejected() {
    let (ctx, _sweet_id) = signed_in_with_sweet(25.0, 10).await;

    let err = ctx
        .shop
        .place_order(OrderRequest {
            address: "12 Fudge Lane".to_string(),
            phone: "5550123".to_string(),
            notes: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Cart is empty");
}

#[tokio::test]
async fn test_catalog_queries_work_without_a_session() {
    let ctx = TestContext::new().await;
    ctx.stub.seed_sweet("Gulab Jamun", "traditional", 25.0, 10);
    ctx.stub.seed_sweet("Dark Truffle", "chocolates", 80.0, 4);

    let all = ctx
        .shop
        .sweets(&sweetshop_client::gateway::SweetQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let chocolates = ctx
        .shop
        .sweets(&sweetshop_client::gateway::SweetQuery {
            category: Some("chocolates".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(chocolates.len(), 1);
    assert_eq!(chocolates.first().unwrap().name, "Dark Truffle");

    let categories = ctx.shop.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
}
