//! End-to-end session lifecycle tests against the stub gateway.

#![allow(clippy::unwrap_used)]

use sweetshop_integration_tests::TestContext;

use sweetshop_client::{ClientError, NewAccount, SocialProfile, SweetShop};
use sweetshop_core::UserRole;

fn jane() -> NewAccount {
    NewAccount {
        name: "Jane".to_string(),
        email: "jane@x.com".to_string(),
        password: "pw123".to_string(),
        password_confirmation: "pw123".to_string(),
        avatar: None,
    }
}

#[tokio::test]
async fn test_login_populates_profile_exactly_as_returned() {
    let ctx = TestContext::new().await;
    ctx.stub.seed_user("Jane", "jane@example.com", "hunter2");

    let profile = ctx.shop.login("jane@example.com", "hunter2").await.unwrap();

    assert_eq!(profile.name, "Jane");
    assert_eq!(profile.email.as_str(), "jane@example.com");
    assert_eq!(profile.role, UserRole::User);
    assert!(ctx.shop.is_authenticated());
    assert_eq!(
        ctx.shop.current_user().unwrap().email.as_str(),
        "jane@example.com"
    );
}

#[tokio::test]
async fn test_login_persists_session_across_restart() {
    let ctx = TestContext::new().await;
    ctx.stub.seed_user("Jane", "jane@example.com", "hunter2");
    ctx.shop.login("jane@example.com", "hunter2").await.unwrap();

    assert!(ctx.token_entry_exists());
    assert!(ctx.profile_entry_exists());

    // A second client over the same state dir plays the role of a restarted
    // process: it must come up already authenticated, before any request.
    let restarted = SweetShop::new(&ctx.config()).unwrap();
    assert!(restarted.is_authenticated());
    assert_eq!(
        restarted.current_user().unwrap().email.as_str(),
        "jane@example.com"
    );

    // And the restored token still works against the gateway.
    restarted.hydrate().await.unwrap();
}

#[tokio::test]
async fn test_login_failure_leaves_state_and_store_untouched() {
    let ctx = TestContext::new().await;
    ctx.stub.seed_user("Jane", "jane@example.com", "hunter2");

    let err = ctx
        .shop
        .login("jane@example.com", "wrong-password")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!ctx.shop.is_authenticated());
    assert!(!ctx.token_entry_exists());
    assert!(!ctx.profile_entry_exists());
}

#[tokio::test]
async fn test_login_unknown_account_uses_gateway_message() {
    let ctx = TestContext::new().await;

    let err = ctx.shop.login("ghost@x.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!ctx.shop.is_authenticated());
}

#[tokio::test]
async fn test_register_then_cart_count_reflects_hydrated_cart() {
    let ctx = TestContext::new().await;

    let profile = ctx.shop.register(jane()).await.unwrap();

    assert_eq!(profile.name, "Jane");
    assert!(ctx.shop.is_authenticated());
    // A fresh account hydrates an empty cart.
    assert_eq!(ctx.shop.cart_item_count(), 0);
}

#[tokio::test]
async fn test_register_duplicate_email_fails_with_detail() {
    let ctx = TestContext::new().await;
    ctx.stub.seed_user("Jane", "jane@x.com", "other-pw");

    let err = ctx.shop.register(jane()).await.unwrap_err();
    assert_eq!(err.to_string(), "Email already registered");
    assert!(!ctx.shop.is_authenticated());
}

#[tokio::test]
async fn test_register_password_mismatch_is_rejected_before_any_request() {
    let ctx = TestContext::new().await;
    let before = ctx.stub.request_count();

    let mut account = jane();
    account.password_confirmation = "pw124".to_string();
    let err = ctx.shop.register(account).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(err.to_string(), "Passwords do not match");
    assert_eq!(ctx.stub.request_count(), before);
    assert!(!ctx.shop.is_authenticated());
}

#[tokio::test]
async fn test_social_login_normalizes_and_signs_in() {
    let ctx = TestContext::new().await;

    let profile = SocialProfile::from_facebook(sweetshop_client::auth::FacebookUserInfo {
        name: "Jane".to_string(),
        email: "jane@facebook-login.com".to_string(),
        picture: Some(sweetshop_client::auth::FacebookPicture {
            data: sweetshop_client::auth::FacebookPictureData {
                url: "https://img.example/fb.jpg".to_string(),
            },
        }),
    })
    .unwrap();

    let signed_in = ctx
        .shop
        .social_login(sweetshop_client::SocialProvider::Facebook, profile)
        .await
        .unwrap();

    assert_eq!(signed_in.provider.as_deref(), Some("facebook"));
    assert_eq!(signed_in.avatar.as_deref(), Some("https://img.example/fb.jpg"));
    assert!(ctx.shop.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_everything_even_when_remote_call_fails() {
    let ctx = TestContext::new().await;
    let sweet_id = ctx.stub.seed_sweet("Gulab Jamun", "traditional", 25.0, 10);
    ctx.stub.seed_user("Jane", "jane@example.com", "hunter2");
    ctx.shop.login("jane@example.com", "hunter2").await.unwrap();
    ctx.shop.add_to_cart(&sweet_id.into(), 2).await.unwrap();
    assert_eq!(ctx.shop.cart_item_count(), 2);

    ctx.stub.fail_logout();
    ctx.shop.logout().await;

    assert!(!ctx.shop.is_authenticated());
    assert!(ctx.shop.cart().is_empty());
    assert!(ctx.shop.wishlist().is_empty());
    assert!(!ctx.token_entry_exists());
    assert!(!ctx.profile_entry_exists());
}

#[tokio::test]
async fn test_401_anywhere_forces_full_session_reset() {
    let ctx = TestContext::new().await;
    let sweet_id = ctx.stub.seed_sweet("Kaju Katli", "traditional", 45.0, 10);
    ctx.stub.seed_user("Jane", "jane@example.com", "hunter2");
    ctx.shop.login("jane@example.com", "hunter2").await.unwrap();

    // The gateway forgets every token; the next authenticated call sees 401.
    ctx.stub.expire_sessions();

    let err = ctx.shop.add_to_cart(&sweet_id.into(), 1).await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));

    assert!(!ctx.shop.is_authenticated());
    assert!(ctx.shop.cart().is_empty());
    assert!(!ctx.token_entry_exists());
    assert!(!ctx.profile_entry_exists());
}

#[tokio::test]
async fn test_refresh_profile_updates_local_and_persisted_copy() {
    let ctx = TestContext::new().await;
    ctx.stub.seed_user("Jane", "jane@example.com", "hunter2");
    ctx.shop.login("jane@example.com", "hunter2").await.unwrap();

    let profile = ctx.shop.refresh_profile().await.unwrap();
    assert_eq!(profile.email.as_str(), "jane@example.com");

    let restarted = SweetShop::new(&ctx.config()).unwrap();
    assert_eq!(restarted.current_user().unwrap().name, "Jane");
}
