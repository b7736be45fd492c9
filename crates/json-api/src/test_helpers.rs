//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::{MockAccountsService, records::UserUuid},
        carts::MockCartsService,
        catalog::{
            MockCatalogService,
            records::{CategoryRecord, CategoryUuid, ProductRecord, ProductUuid},
        },
        orders::{
            MockOrdersService, OrderStatus,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Mocked services; any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct TestApp {
    pub(crate) catalog: MockCatalogService,
    pub(crate) accounts: MockAccountsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl TestApp {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            accounts: Arc::new(self.accounts),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` without authentication.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as if [`TEST_USER_UUID`] had signed in.
    pub(crate) fn user_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

pub(crate) fn make_category(uuid: CategoryUuid, name: &str) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: name.to_string(),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, category: CategoryUuid, price: u64) -> ProductRecord {
    ProductRecord {
        uuid,
        category_uuid: category,
        name: "Desk Lamp".to_string(),
        description: "Brass desk lamp".to_string(),
        price,
        original_price: None,
        stock: 10,
        rating: 450,
        reviews_count: 12,
        is_trending: false,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A single-line order placed at `created_at`.
pub(crate) fn make_order(
    uuid: OrderUuid,
    status: OrderStatus,
    created_at: Timestamp,
) -> OrderRecord {
    let product = ProductUuid::new();

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        total_amount: 20_00,
        status,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: product,
            quantity: 2,
            price: 10_00,
            stock_at_purchase: Some(10),
            created_at,
        }],
        created_at,
        updated_at: created_at,
        estimated_delivery: created_at.checked_add(jiff::SignedDuration::from_hours(48)).ok(),
        tracking_number: None,
    }
}
