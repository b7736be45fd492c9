//! Catalog Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// Amounts are minor units (cents). `rating` is stored in hundredths of a
/// star, so `450` reads as 4.50.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub original_price: Option<u64>,
    pub stock: u32,
    pub rating: u16,
    pub reviews_count: u32,
    pub is_trending: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whole-percent markdown from `original_price` to `price`.
    ///
    /// Display-only: a missing, zero or lower original price yields `0`.
    #[must_use]
    pub fn discount_percent(&self) -> u64 {
        match self.original_price {
            Some(original) if original > self.price => {
                (original - self.price).saturating_mul(100) / original
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: u64, original_price: Option<u64>) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            category_uuid: CategoryUuid::new(),
            name: "Lamp".to_string(),
            description: String::new(),
            price,
            original_price,
            stock: 0,
            rating: 0,
            reviews_count: 0,
            is_trending: false,
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn discount_percent_rounds_down() {
        assert_eq!(product(75_00, Some(100_00)).discount_percent(), 25);
        assert_eq!(product(66_67, Some(100_00)).discount_percent(), 33);
    }

    #[test]
    fn discount_percent_is_zero_without_markdown() {
        assert_eq!(product(10_00, None).discount_percent(), 0);
        assert_eq!(product(10_00, Some(0)).discount_percent(), 0);
        assert_eq!(product(10_00, Some(8_00)).discount_percent(), 0);
    }
}
