//! Order Index Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The signed-in user's orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Lists the user's orders with statuses refreshed as of now. An optional
/// `at` previews the statuses at another time without storing them.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid \"at\" parameter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let at = at.into_point_in_time()?;

    let orders = state
        .app
        .orders
        .list_orders(user, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders
            .into_iter()
            .map(|order| view_at(order, at).into())
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrderStatus, records::OrderUuid};

    use crate::test_helpers::{TEST_USER_UUID, TestApp, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestApp {
            orders,
            ..TestApp::default()
        }
        .user_service(Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn lists_orders_refreshed_at_current_time() -> TestResult {
        let placed: Timestamp = "2026-03-01T09:00:00Z".parse()?;
        let newer = OrderUuid::new();
        let older = OrderUuid::new();
        let before = Timestamp::now();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(move |user, now| {
                *user == TEST_USER_UUID && *now >= before && *now <= Timestamp::now()
            })
            .return_once(move |_, _| {
                Ok(vec![
                    make_order(newer, OrderStatus::Processing, placed),
                    make_order(older, OrderStatus::Packaging, placed),
                ])
            });

        let mut res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.orders.iter().map(|o| o.uuid).collect::<Vec<_>>(),
            vec![newer.into_uuid(), older.into_uuid()]
        );
        assert_eq!(
            body.orders.iter().map(|o| o.status.as_str()).collect::<Vec<_>>(),
            vec!["processing", "packaging"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn earlier_at_previews_status_but_refreshes_at_current_time() -> TestResult {
        let placed: Timestamp = "2026-03-01T09:00:00Z".parse()?;
        let at = placed.checked_add(SignedDuration::from_hours(30))?;
        let uuid = OrderUuid::new();
        let before = Timestamp::now();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(move |_, now| *now >= before)
            .return_once(move |_, _| Ok(vec![make_order(uuid, OrderStatus::Delivered, placed)]));

        let mut res = TestClient::get(format!("http://example.com/orders?at={at}"))
            .send(&make_service(orders))
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.orders.iter().map(|o| o.status.as_str()).collect::<Vec<_>>(),
            vec!["packaging"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_at_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders?at=yesterday")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
