//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{count_param, try_get_count, try_get_timestamp},
    domain::{
        accounts::records::UserUuid,
        carts::records::{CartItemRecord, CartItemUuid, CartUuid},
        catalog::records::ProductUuid,
    },
};

const ADD_CART_ITEM_SQL: &str = include_str!("../sql/add_cart_item.sql");
const LOCK_CART_ITEM_OWNER_SQL: &str = include_str!("../sql/lock_cart_item_owner.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts a quantity-1 line or increments the existing line for the
    /// same product. Yields `RowNotFound` when the product is missing or
    /// inactive.
    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CartItemUuid,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(ADD_CART_ITEM_SQL)
            .bind(candidate)
            .bind(cart)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    /// Locks the item row and returns the user owning its cart.
    pub(crate) async fn lock_item_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        query_scalar::<Postgres, UserUuid>(LOCK_CART_ITEM_OWNER_SQL)
            .bind(item)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item)
            .bind(count_param(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            cart_uuid: row.try_get("cart_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            quantity: try_get_count(row, "quantity")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
