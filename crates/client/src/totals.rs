//! Derived views over the cart mirror.
//!
//! Pure functions; callers pass a snapshot and get a number back. Both
//! tolerate an empty cart and never mutate their input.

use sweetshop_core::Price;

use crate::gateway::CartItem;

/// Sum of `unit price x quantity` across all lines.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Price {
    items.iter().map(|item| item.price.times(item.quantity)).sum()
}

/// Total number of units across all lines.
#[must_use]
pub fn cart_item_count(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use sweetshop_core::SweetId;

    fn line(sweet_id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            sweet_id: SweetId::new(sweet_id),
            quantity,
            price: Price::from_units(price),
            name: format!("sweet {sweet_id}"),
            image: String::new(),
            weight: "250g".to_string(),
        }
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        assert_eq!(cart_total(&[]), Price::ZERO);
        assert_eq!(cart_item_count(&[]), 0);
    }

    #[test]
    fn test_total_multiplies_price_by_quantity() {
        let cart = [line("s-1", 25, 2), line("s-2", 45, 1)];
        assert_eq!(cart_total(&cart), Price::from_units(95));
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = [line("s-1", 25, 2), line("s-2", 45, 3)];
        assert_eq!(cart_item_count(&cart), 5);
    }

    #[test]
    fn test_fractional_prices_stay_exact() {
        let mut item = line("s-1", 0, 3);
        item.price = "10.15".parse().unwrap();
        assert_eq!(cart_total(&[item]).to_string(), "30.45");
    }
}
