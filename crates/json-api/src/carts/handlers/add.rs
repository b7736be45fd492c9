//! Add To Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, responses::CartActionResponse},
    extensions::*,
    state::State,
};

/// Add To Cart Handler
///
/// Adds one unit of the product, incrementing the line if already present.
#[endpoint(
    tags("cart"),
    summary = "Add Product To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartActionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let item = state
        .app
        .carts
        .add_item(user, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(%user, item = %item.uuid, quantity = item.quantity, "product added to cart");

    Ok(Json(CartActionResponse::new(
        "Product added to cart",
        Some(item.quantity),
    )))
}
