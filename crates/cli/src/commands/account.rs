//! Session commands: login, register, logout, whoami.

use sweetshop_client::{ClientError, NewAccount, SweetShop};

/// Sign in and report the restored cart size.
pub async fn login(shop: &SweetShop, email: &str, password: &str) -> Result<(), ClientError> {
    let profile = shop.login(email, password).await?;
    println!("Signed in as {} <{}>", profile.name, profile.email);
    println!(
        "Cart: {} item(s), total {}",
        shop.cart_item_count(),
        shop.cart_total()
    );
    Ok(())
}

/// Create an account and sign into it.
pub async fn register(
    shop: &SweetShop,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<(), ClientError> {
    let profile = shop
        .register(NewAccount {
            name,
            email,
            password,
            password_confirmation: confirm_password,
            avatar: None,
        })
        .await?;
    println!("Welcome, {} <{}>", profile.name, profile.email);
    Ok(())
}

/// Sign out. Never fails: the local session is cleared even when the
/// gateway is unreachable.
pub async fn logout(shop: &SweetShop) {
    shop.logout().await;
    println!("Signed out");
}

/// Show the locally held session, if any.
pub fn whoami(shop: &SweetShop) {
    match shop.current_user() {
        Some(profile) => {
            println!("{} <{}> ({})", profile.name, profile.email, profile.role);
            if let Some(provider) = profile.provider {
                println!("via {provider}");
            }
        }
        None => println!("Not signed in"),
    }
}
