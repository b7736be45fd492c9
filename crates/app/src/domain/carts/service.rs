//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        accounts::records::UserUuid,
        carts::{
            data::QuantityChange,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
            totals::compute_total,
        },
        catalog::records::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, CartUuid::new(), user)
            .await?;

        cart.lines = self
            .carts_repository
            .get_cart_lines(&mut tx, cart.uuid)
            .await?;

        cart.total = compute_total(&cart.lines);

        tx.commit().await?;

        Ok(cart)
    }

    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        self.get_or_create_cart(user).await
    }

    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, CartUuid::new(), user)
            .await?;

        let item = self
            .items_repository
            .add_item(&mut tx, CartItemUuid::new(), cart.uuid, product)
            .await?;

        tx.commit().await?;

        debug!(cart = %cart.uuid, item = %item.uuid, quantity = item.quantity, "added cart item");

        Ok(item)
    }

    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self
            .items_repository
            .lock_item_owner(&mut tx, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if owner != user {
            return Err(CartsServiceError::Forbidden);
        }

        self.items_repository.delete_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<QuantityChange, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self
            .items_repository
            .lock_item_owner(&mut tx, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if owner != user {
            return Err(CartsServiceError::Forbidden);
        }

        let change = if quantity <= 0 {
            self.items_repository.delete_item(&mut tx, item).await?;

            QuantityChange::Removed
        } else {
            let quantity = i32::try_from(quantity)
                .ok()
                .and_then(|quantity| u32::try_from(quantity).ok())
                .ok_or(CartsServiceError::InvalidData)?;

            let updated = self
                .items_repository
                .update_quantity(&mut tx, item, quantity)
                .await?;

            QuantityChange::Updated(updated)
        };

        tx.commit().await?;

        Ok(change)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Returns the user's cart with priced lines, creating an empty cart the
    /// first time. Concurrent calls for the same user yield the same cart.
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// The user's cart as shown to them: lines in insertion order with live
    /// prices and total. Carts are created lazily, so this never fails with
    /// `NotFound`.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Adds one unit of an active product to the user's cart, incrementing
    /// the existing line when the product is already present.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Removes an item from the user's cart.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Sets an item's quantity. A quantity of zero or less removes the item.
    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<QuantityChange, CartsServiceError>;
}
