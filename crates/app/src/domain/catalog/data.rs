//! Catalog Data

use crate::domain::catalog::records::{CategoryUuid, ProductUuid};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub original_price: Option<u64>,
    pub stock: u32,
}

/// Product Update Data
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
    /// Hundredths of a star, `0..=500`.
    pub rating: Option<u16>,
    pub reviews_count: Option<u32>,
}
