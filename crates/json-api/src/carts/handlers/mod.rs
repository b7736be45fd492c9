//! Cart Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::{
        carts::records::{CartItemRecord, CartItemUuid, CartLine, CartRecord, CartUuid},
        catalog::records::ProductUuid,
    };

    use crate::test_helpers::TEST_USER_UUID;

    pub(super) fn make_item(uuid: CartItemUuid, product: ProductUuid, quantity: u32) -> CartItemRecord {
        CartItemRecord {
            uuid,
            cart_uuid: CartUuid::new(),
            product_uuid: product,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(super) fn make_cart(lines: Vec<CartLine>) -> CartRecord {
        let total = lines.iter().map(CartLine::subtotal).sum();

        CartRecord {
            uuid: CartUuid::new(),
            user_uuid: TEST_USER_UUID,
            lines,
            total,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(super) fn make_line(name: &str, unit_price: u64, quantity: u32) -> CartLine {
        CartLine {
            uuid: CartItemUuid::new(),
            product_uuid: ProductUuid::new(),
            product_name: name.to_string(),
            unit_price,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
