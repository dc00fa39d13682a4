//! Catalog Router

use axum::{Router, routing::get};

use crate::domain::repository::ProductRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router for any repository implementation
///
/// The routes expect a [`CurrentUser`](kernel::identity::CurrentUser)
/// extension; the caller layers the access-control gate on top.
pub fn catalog_router<R>(state: CatalogAppState<R>) -> Router
where
    R: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/products",
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route(
            "/products/{id}",
            get(handlers::get_product::<R>)
                .put(handlers::update_product::<R>)
                .delete(handlers::delete_product::<R>),
        )
        .with_state(state)
}
