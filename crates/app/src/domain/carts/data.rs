//! Cart Data

use crate::domain::carts::records::CartItemRecord;

/// Outcome of setting a cart item's quantity.
#[derive(Debug, Clone)]
pub enum QuantityChange {
    /// The item now carries the requested quantity.
    Updated(CartItemRecord),

    /// A zero or negative quantity removed the item.
    Removed,
}
