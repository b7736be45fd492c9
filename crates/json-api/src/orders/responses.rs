//! Order Responses

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderItemRecord, OrderRecord};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// pending, processing, packaging, shipping, delivered or canceled
    pub status: String,

    /// Sum of the purchased items at their purchase prices, in minor units
    pub total_amount: u64,

    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
    pub estimated_delivery: Option<String>,
    pub tracking_number: Option<String>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            status: order.status.to_string(),
            total_amount: order.total_amount,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            estimated_delivery: order.estimated_delivery.as_ref().map(ToString::to_string),
            tracking_number: order.tracking_number,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,

    /// Unit price at purchase, in minor units
    pub price: u64,

    pub subtotal: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            subtotal: item.subtotal(),
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}
