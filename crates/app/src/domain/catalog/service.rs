//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewCategory, NewProduct, ProductUpdate},
        errors::CatalogServiceError,
        records::{CategoryRecord, CategoryUuid, ProductRecord, ProductUuid},
        repository::PgCatalogRepository,
    },
};

/// Number of products shown on the storefront home page.
pub const HOME_PRODUCT_LIMIT: u32 = 12;

/// Number of related products shown next to a product.
pub const RELATED_PRODUCT_LIMIT: u32 = 4;

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_active_products(
        &self,
        category: Option<CategoryUuid>,
        limit: Option<u32>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_active_products(&mut tx, category, limit)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn related_products(
        &self,
        product: ProductUuid,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .related_products(&mut tx, product, limit)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, CatalogServiceError> {
        if update.rating.is_some_and(|rating| rating > MAX_RATING)
            || update
                .reviews_count
                .is_some_and(|count| i32::try_from(count).is_err())
        {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

/// Five stars, in hundredths.
const MAX_RATING: u16 = 500;

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all active categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Retrieves active products, newest first, optionally restricted to a
    /// category and capped at `limit`.
    async fn list_active_products(
        &self,
        category: Option<CategoryUuid>,
        limit: Option<u32>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a single active product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError>;

    /// Active products sharing the given product's category, excluding it.
    async fn related_products(
        &self,
        product: ProductUuid,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Updates price, stock or visibility of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, CatalogServiceError>;
}
