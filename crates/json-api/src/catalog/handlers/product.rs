//! Product Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::RELATED_PRODUCT_LIMIT;

use crate::{
    catalog::{errors::into_status_error, responses::ProductResponse},
    extensions::*,
    state::State,
};

/// Product Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailResponse {
    pub product: ProductResponse,

    /// Other active products from the same category
    pub related: Vec<ProductResponse>,
}

/// Product Detail Handler
#[endpoint(
    tags("catalog"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner().into();

    let found = state
        .app
        .catalog
        .get_product(product)
        .await
        .map_err(into_status_error)?;

    let related = state
        .app
        .catalog
        .related_products(product, RELATED_PRODUCT_LIMIT)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductDetailResponse {
        product: found.into(),
        related: related.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::catalog::{
        CatalogServiceError, MockCatalogService,
        records::{CategoryUuid, ProductUuid},
    };

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        TestApp {
            catalog,
            ..TestApp::default()
        }
        .public_service(Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn product_detail_includes_related_products() -> TestResult {
        let category = CategoryUuid::new();
        let lamp = ProductUuid::new();
        let sconce = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .withf(move |product| *product == lamp)
            .return_once(move |_| Ok(make_product(lamp, category, 10_00)));

        catalog
            .expect_related_products()
            .once()
            .withf(move |product, limit| *product == lamp && *limit == RELATED_PRODUCT_LIMIT)
            .return_once(move |_, _| Ok(vec![make_product(sconce, category, 20_00)]));

        let mut res = TestClient::get(format!("http://example.com/products/{lamp}"))
            .send(&make_service(catalog))
            .await;

        let body: ProductDetailResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.product.uuid, lamp.into_uuid());
        assert_eq!(
            body.related.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![sconce.into_uuid()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_404() {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        catalog.expect_related_products().never();

        let res = TestClient::get(format!("http://example.com/products/{}", Uuid::now_v7()))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn malformed_product_uuid_returns_400() {
        let res = TestClient::get("http://example.com/products/not-a-uuid")
            .send(&make_service(MockCatalogService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
