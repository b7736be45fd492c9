//! Catalog Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::records::{CategoryRecord, ProductRecord};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
        }
    }
}

/// Product Response
///
/// Amounts are in minor units; `rating` is in hundredths of a star.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub category_uuid: Uuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub original_price: Option<u64>,

    /// Whole-percent markdown from `original_price`, zero when not discounted.
    pub discount_percent: u64,

    pub stock: u32,
    pub rating: u16,
    pub reviews_count: u32,
    pub is_trending: bool,
    pub created_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            discount_percent: product.discount_percent(),
            uuid: product.uuid.into_uuid(),
            category_uuid: product.category_uuid.into_uuid(),
            name: product.name,
            description: product.description,
            price: product.price,
            original_price: product.original_price,
            stock: product.stock,
            rating: product.rating,
            reviews_count: product.reviews_count,
            is_trending: product.is_trending,
            created_at: product.created_at.to_string(),
        }
    }
}
