//! Order Items Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{amount_param, count_param, try_get_amount, try_get_count, try_get_timestamp},
    domain::{
        catalog::records::ProductUuid,
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const GET_PURCHASABLE_PRODUCT_SQL: &str = include_str!("../sql/get_purchasable_product.sql");

/// Price and stock of an active product at the moment of purchase.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProductSnapshot {
    pub(crate) uuid: ProductUuid,
    pub(crate) price: u64,
    pub(crate) stock: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Share-locks an active product so its price cannot change until the
    /// order commits.
    pub(crate) async fn product_snapshot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductSnapshot>, sqlx::Error> {
        query_as::<Postgres, ProductSnapshot>(GET_PURCHASABLE_PRODUCT_SQL)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        snapshot: ProductSnapshot,
        quantity: u32,
        created_at: Timestamp,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new())
            .bind(order)
            .bind(snapshot.uuid)
            .bind(count_param(quantity, "quantity")?)
            .bind(amount_param(snapshot.price, "price")?)
            .bind(count_param(snapshot.stock, "stock_at_purchase")?)
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSnapshot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_count(row, "stock")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock_at_purchase: Option<i32> = row.try_get("stock_at_purchase")?;

        let stock_at_purchase = stock_at_purchase
            .map(u32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock_at_purchase".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_uuid: row.try_get("order_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            quantity: try_get_count(row, "quantity")?,
            price: try_get_amount(row, "price")?,
            stock_at_purchase,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
