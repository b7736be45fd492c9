//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        accounts::records::UserUuid, catalog::records::ProductUuid, orders::status::OrderStatus,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,

    /// Sum of the item snapshots at placement, in minor units.
    pub total_amount: u64,

    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub estimated_delivery: Option<Timestamp>,
    pub tracking_number: Option<String>,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Snapshot of a purchased product, frozen when the order is placed.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: u64,
    pub stock_at_purchase: Option<u32>,
    pub created_at: Timestamp,
}

impl OrderItemRecord {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}
