//! Home Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::catalog::HOME_PRODUCT_LIMIT;

use crate::{
    catalog::{
        errors::into_status_error,
        responses::{CategoryResponse, ProductResponse},
    },
    extensions::*,
    state::State,
};

/// Home Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomeResponse {
    /// Newest active products
    pub products: Vec<ProductResponse>,

    /// All active categories
    pub categories: Vec<CategoryResponse>,
}

/// Home Handler
///
/// Returns the newest active products and the category list.
#[endpoint(
    tags("catalog"),
    summary = "Storefront Home",
    responses(
        (status_code = StatusCode::OK, description = "Featured products and categories"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HomeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .catalog
        .list_active_products(None, Some(HOME_PRODUCT_LIMIT))
        .await
        .map_err(into_status_error)?;

    let categories = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(HomeResponse {
        products: products.into_iter().map(Into::into).collect(),
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
