//! App Router

use salvo::Router;

use crate::{auth, carts, catalog, orders};

/// Storefront routes: catalog browsing is public, cart and orders require a
/// session.
pub(crate) fn app_router() -> Router {
    Router::new()
        .get(catalog::home::handler)
        .push(Router::with_path("products/{product}").get(catalog::product::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .push(Router::with_path("add/{product}").post(carts::add::handler))
                        .push(Router::with_path("remove/{item}").post(carts::remove::handler))
                        .push(Router::with_path("update/{item}").post(carts::update::handler)),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::checkout::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(Router::with_path("cancel").post(orders::cancel::handler)),
                        ),
                ),
        )
}
