//! Cart totals.

use crate::domain::carts::records::CartLine;

/// Sum of `unit_price × quantity` over the given lines, in minor units.
///
/// Prices are whatever the lines carry, which for a cart read from storage
/// is the product's current price.
#[must_use]
pub fn compute_total(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .fold(0_u64, |total, line| total.saturating_add(line.subtotal()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::{
        carts::records::{CartItemUuid, CartLine},
        catalog::records::ProductUuid,
    };

    use super::*;

    fn line(unit_price: u64, quantity: u32) -> CartLine {
        CartLine {
            uuid: CartItemUuid::new(),
            product_uuid: ProductUuid::new(),
            product_name: "Item".to_string(),
            unit_price,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(compute_total(&[]), 0);
    }

    #[test]
    fn total_multiplies_price_by_quantity() {
        let lines = [line(10_00, 2), line(5_50, 1)];

        assert_eq!(compute_total(&lines), 25_50);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let lines = [line(u64::MAX, 2), line(1, 1)];

        assert_eq!(compute_total(&lines), u64::MAX);
    }
}
