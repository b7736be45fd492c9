//! Cancel Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    observability,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Cancel Order Handler
///
/// Cancels the order. Canceling an already canceled order returns it
/// unchanged.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order canceled"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let canceled = state
        .app
        .orders
        .cancel_order(user, order.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    observability::order_canceled();
    info!(%user, order = %canceled.uuid, "order canceled");

    Ok(Json(canceled.into()))
}
