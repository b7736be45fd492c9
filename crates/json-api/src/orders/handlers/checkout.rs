//! Checkout Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderUuid;

use crate::{
    extensions::*,
    observability,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Checkout Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Client-chosen order UUID; repeating it yields 409 instead of a second
    /// order. Generated when omitted.
    #[serde(default)]
    pub uuid: Option<Uuid>,
}

/// Checkout Handler
///
/// Places an order from the signed-in user's cart and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty or invalid"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let uuid = json
        .into_inner()
        .uuid
        .map_or_else(OrderUuid::new, OrderUuid::from_uuid);

    let order = state
        .app
        .orders
        .checkout(user, uuid, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    observability::order_placed();

    res.add_header(LOCATION, format!("/orders/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrderStatus, OrderValidationError, OrdersServiceError,
    };

    use crate::test_helpers::{TEST_USER_UUID, TestApp, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestApp {
            orders,
            ..TestApp::default()
        }
        .user_service(Router::with_path("orders").post(handler))
    }

    #[tokio::test]
    async fn checkout_with_client_uuid_returns_201() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(move |user, order, _| *user == TEST_USER_UUID && *order == uuid)
            .return_once(move |_, _, now| Ok(make_order(uuid, OrderStatus::Pending, now)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "uuid": uuid.into_uuid() }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.status, "pending");
        assert_eq!(body.total_amount, 20_00);
        assert!(body.estimated_delivery.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_uuid_generates_one() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, uuid, now| Ok(make_order(uuid, OrderStatus::Pending, now)));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
    }

    #[tokio::test]
    async fn empty_cart_returns_400() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _, _| Err(OrderValidationError::EmptyOrder.into()));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn repeated_uuid_returns_409() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "uuid": Uuid::now_v7() }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
