//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        accounts::records::UserUuid,
        carts::{
            records::CartUuid,
            repositories::PgCartsRepository,
        },
        orders::{
            data::{NewOrder, NewOrderLine},
            delivery::{RandomTransitDays, TransitDays, estimate_delivery},
            errors::{OrderValidationError, OrdersServiceError},
            records::{OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository, ProductSnapshot},
            status::current_status,
        },
    },
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    transit_days: Arc<dyn TransitDays>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_transit_days(db, Arc::new(RandomTransitDays::from_entropy()))
    }

    #[must_use]
    pub fn with_transit_days(db: Db, transit_days: Arc<dyn TransitDays>) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            transit_days,
        }
    }

    /// Validates the lines, snapshots product prices and stock, and inserts
    /// the order with its items. Writes nothing until every line is valid.
    async fn place(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        uuid: OrderUuid,
        lines: &[NewOrderLine],
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if lines.is_empty() {
            return Err(OrderValidationError::EmptyOrder.into());
        }

        let mut quantities = Vec::with_capacity(lines.len());

        for line in lines {
            if line.quantity <= 0 {
                return Err(OrderValidationError::NonPositiveQuantity {
                    product: line.product_uuid,
                    quantity: line.quantity,
                }
                .into());
            }

            let quantity = i32::try_from(line.quantity)
                .ok()
                .and_then(|quantity| u32::try_from(quantity).ok())
                .ok_or(OrderValidationError::QuantityTooLarge {
                    product: line.product_uuid,
                    quantity: line.quantity,
                })?;

            quantities.push(quantity);
        }

        let mut snapshots: Vec<(ProductSnapshot, u32)> = Vec::with_capacity(lines.len());

        for (line, quantity) in lines.iter().zip(quantities) {
            let snapshot = self
                .items_repository
                .product_snapshot(tx, line.product_uuid)
                .await?
                .ok_or(OrderValidationError::UnknownProduct(line.product_uuid))?;

            snapshots.push((snapshot, quantity));
        }

        let total_amount = snapshots.iter().fold(0_u64, |total, (snapshot, quantity)| {
            total.saturating_add(snapshot.price.saturating_mul(u64::from(*quantity)))
        });

        let transit_days = self.transit_days.draw();
        let estimated_delivery = estimate_delivery(now, transit_days);

        if estimated_delivery.is_none() {
            warn!(order = %uuid, %now, "delivery estimate out of range");
        }

        let mut order = self
            .orders_repository
            .create_order(tx, uuid, user, total_amount, now, estimated_delivery)
            .await?;

        for (snapshot, quantity) in snapshots {
            let item = self
                .items_repository
                .create_item(tx, order.uuid, snapshot, quantity, now)
                .await?;

            order.items.push(item);
        }

        info!(order = %order.uuid, user = %user, total_amount, transit_days, "placed order");

        Ok(order)
    }

    /// Persists forward progress of the derived status and returns the
    /// order as it stands at `now`.
    async fn refresh(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        mut order: OrderRecord,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let derived = current_status(order.status, order.created_at, now);

        if derived > order.status {
            order = match self
                .orders_repository
                .update_status(tx, order.uuid, derived, now)
                .await?
            {
                Some(updated) => updated,
                None => self.orders_repository.get_order(tx, user, order.uuid).await?,
            };
        }

        order.status = current_status(order.status, order.created_at, now);
        order.items = self.items_repository.get_items(tx, order.uuid).await?;

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .place(&mut tx, user, order.uuid, &order.lines, now)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn checkout(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, CartUuid::new(), user)
            .await?;

        let lines: Vec<NewOrderLine> = self
            .carts_repository
            .get_cart_lines(&mut tx, cart.uuid)
            .await?
            .into_iter()
            .map(|line| NewOrderLine {
                product_uuid: line.product_uuid,
                quantity: i64::from(line.quantity),
            })
            .collect();

        let created = self.place(&mut tx, user, order, &lines, now).await?;

        self.carts_repository.clear_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.refresh_status(user, order, now).await
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_orders(&mut tx, user).await?;

        let mut refreshed = Vec::with_capacity(orders.len());

        for order in orders {
            refreshed.push(self.refresh(&mut tx, user, order, now).await?);
        }

        tx.commit().await?;

        Ok(refreshed)
    }

    async fn refresh_status(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let stored = self.orders_repository.get_order(&mut tx, user, order).await?;

        let refreshed = self.refresh(&mut tx, user, stored, now).await?;

        tx.commit().await?;

        Ok(refreshed)
    }

    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut canceled = match self
            .orders_repository
            .cancel_order(&mut tx, user, order, now)
            .await?
        {
            Some(canceled) => {
                info!(order = %order, user = %user, "canceled order");

                canceled
            }
            None => self.orders_repository.get_order(&mut tx, user, order).await?,
        };

        canceled.items = self.items_repository.get_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(canceled)
    }

    async fn assign_tracking_number(
        &self,
        order: OrderUuid,
        tracking_number: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut updated = self
            .orders_repository
            .assign_tracking_number(&mut tx, order, &tracking_number)
            .await?;

        updated.items = self.items_repository.get_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order from explicit lines, snapshotting current prices.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Places an order from the user's cart and empties the cart.
    async fn checkout(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieves one of the user's orders with its status as of `now`.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first, with statuses as of `now`.
    async fn list_orders(
        &self,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Derives the order's status at `now` and stores it if it moved on.
    /// Never overwrites a cancellation.
    async fn refresh_status(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Cancels the order. Canceling a canceled order returns it unchanged.
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Records the carrier's tracking number for an order.
    async fn assign_tracking_number(
        &self,
        order: OrderUuid,
        tracking_number: String,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
