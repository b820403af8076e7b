//! Checkout and order history commands.

use clap::Subcommand;

use sweetshop_client::gateway::{Order, OrderRequest};
use sweetshop_client::{ClientError, SweetShop};
use sweetshop_core::OrderId;

#[derive(Subcommand)]
pub enum OrderAction {
    /// List your orders, newest first
    List,
    /// Show one order
    Show {
        /// Order ID
        order_id: String,
    },
    /// Place an order from the current cart
    Place {
        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Contact phone number
        #[arg(short, long)]
        phone: String,

        /// Delivery notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Cancel a pending order
    Cancel {
        /// Order ID
        order_id: String,
    },
}

pub async fn orders(shop: &SweetShop, action: OrderAction) -> Result<(), ClientError> {
    match action {
        OrderAction::List => {
            let orders = shop.orders().await?;
            if orders.is_empty() {
                println!("No orders yet");
            }
            for order in orders {
                println!(
                    "{}  {} - {} item(s), total {}",
                    order.id,
                    order.status,
                    order.items.len(),
                    order.total
                );
            }
        }
        OrderAction::Show { order_id } => {
            let order = shop.order(&OrderId::new(order_id)).await?;
            print_order(&order);
        }
        OrderAction::Place {
            address,
            phone,
            notes,
        } => {
            let order = shop
                .place_order(OrderRequest {
                    address,
                    phone,
                    notes,
                })
                .await?;
            println!("Order placed");
            print_order(&order);
        }
        OrderAction::Cancel { order_id } => {
            let order = shop.cancel_order(&OrderId::new(order_id)).await?;
            println!("Order {} is now {}", order.id, order.status);
        }
    }
    Ok(())
}

fn print_order(order: &Order) {
    println!("Order {} ({})", order.id, order.status);
    for item in &order.items {
        println!(
            "  {} x{} @ {} = {}",
            item.name,
            item.quantity,
            item.price,
            item.price.times(item.quantity)
        );
    }
    println!("  Total {}", order.total);
    if let Some(address) = &order.address {
        println!("  Deliver to: {address}");
    }
}
