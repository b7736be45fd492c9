//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartLine, CartRecord};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,

    /// Lines in the order they were first added
    pub items: Vec<CartLineResponse>,

    /// Sum of line subtotals at current prices, in minor units
    pub total: u64,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            items: cart.lines.into_iter().map(Into::into).collect(),
            total: cart.total,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub subtotal: u64,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            subtotal: line.subtotal(),
            uuid: line.uuid.into_uuid(),
            product_uuid: line.product_uuid.into_uuid(),
            product_name: line.product_name,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Outcome of a cart mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartActionResponse {
    pub success: bool,
    pub message: String,

    /// The item's quantity after the change, absent once removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl CartActionResponse {
    pub(crate) fn new(message: &str, quantity: Option<u32>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            quantity,
        }
    }
}
