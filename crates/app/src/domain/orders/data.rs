//! Order Data

use crate::domain::{catalog::records::ProductUuid, orders::records::OrderUuid};

/// An order to be placed from explicit lines.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub lines: Vec<NewOrderLine>,
}

/// A requested product and quantity. Quantities are validated when the
/// order is placed, so callers may pass raw client input.
#[derive(Debug, Clone, Copy)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}
