//! Cart and wishlist commands.

use clap::Subcommand;

use sweetshop_client::{ClientError, SweetShop};
use sweetshop_core::SweetId;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the current cart
    Show,
    /// Add a sweet to the cart
    Add {
        /// Sweet ID
        sweet_id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the exact quantity of a cart line (0 removes it)
    Update {
        /// Sweet ID
        sweet_id: String,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a sweet from the cart
    Remove {
        /// Sweet ID
        sweet_id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show the current wishlist
    Show,
    /// Save a sweet to the wishlist
    Add {
        /// Sweet ID
        sweet_id: String,
    },
    /// Remove a sweet from the wishlist
    Remove {
        /// Sweet ID
        sweet_id: String,
    },
    /// Empty the wishlist
    Clear,
}

/// Run a cart subcommand and print the resulting cart.
pub async fn cart(shop: &SweetShop, action: CartAction) -> Result<(), ClientError> {
    match action {
        CartAction::Show => shop.hydrate().await?,
        CartAction::Add { sweet_id, quantity } => {
            shop.add_to_cart(&SweetId::new(sweet_id), quantity).await?;
        }
        CartAction::Update { sweet_id, quantity } => {
            shop.update_cart_quantity(&SweetId::new(sweet_id), quantity)
                .await?;
        }
        CartAction::Remove { sweet_id } => {
            shop.remove_from_cart(&SweetId::new(sweet_id)).await?;
        }
        CartAction::Clear => shop.clear_cart().await?,
    }

    print_cart(shop);
    Ok(())
}

/// Run a wishlist subcommand and print the resulting wishlist.
pub async fn wishlist(shop: &SweetShop, action: WishlistAction) -> Result<(), ClientError> {
    match action {
        WishlistAction::Show => shop.hydrate().await?,
        WishlistAction::Add { sweet_id } => {
            shop.add_to_wishlist(&SweetId::new(sweet_id)).await?;
        }
        WishlistAction::Remove { sweet_id } => {
            shop.remove_from_wishlist(&SweetId::new(sweet_id)).await?;
        }
        WishlistAction::Clear => shop.clear_wishlist().await?,
    }

    let items = shop.wishlist();
    if items.is_empty() {
        println!("Wishlist is empty");
        return Ok(());
    }
    for item in items {
        println!("{}  {} - {}", item.sweet_id, item.name, item.price);
    }
    Ok(())
}

fn print_cart(shop: &SweetShop) {
    let items = shop.cart();
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in &items {
        println!(
            "{}  {} x{} @ {} = {}",
            item.sweet_id,
            item.name,
            item.quantity,
            item.price,
            item.price.times(item.quantity)
        );
    }
    println!(
        "{} item(s), total {}",
        shop.cart_item_count(),
        shop.cart_total()
    );
}
