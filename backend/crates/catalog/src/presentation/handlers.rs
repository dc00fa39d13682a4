//! HTTP Handlers
//!
//! Every handler reads the caller from the [`CurrentUser`] extension set by
//! the access-control gate.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::extract::ValidatedJson;
use kernel::identity::CurrentUser;
use kernel::response::ApiResponse;

use crate::application::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;
use crate::presentation::dto::{ProductRequest, ProductResponse};

/// Shared state for catalog handlers
pub struct CatalogAppState<R>
where
    R: ProductRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> CatalogAppState<R>
where
    R: ProductRepository + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

impl<R> Clone for CatalogAppState<R>
where
    R: ProductRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// POST /api/v1/products
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> CatalogResult<ApiResponse<ProductResponse>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = CreateProductUseCase::new(state.repo.clone())
        .execute(&user, req.into())
        .await?;

    Ok(ApiResponse::created(product.into()))
}

/// GET /api/v1/products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
) -> CatalogResult<ApiResponse<Vec<ProductResponse>>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let products = ListProductsUseCase::new(state.repo.clone())
        .execute(&user)
        .await?;

    Ok(ApiResponse::ok(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// GET /api/v1/products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> CatalogResult<ApiResponse<ProductResponse>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = GetProductUseCase::new(state.repo.clone())
        .execute(&user, &id)
        .await?;

    Ok(ApiResponse::ok(product.into()))
}

/// PUT /api/v1/products/{id}
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> CatalogResult<ApiResponse<ProductResponse>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = UpdateProductUseCase::new(state.repo.clone())
        .execute(&user, &id, req.into())
        .await?;

    Ok(ApiResponse::ok(product.into()))
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> CatalogResult<StatusCode>
where
    R: ProductRepository + Send + Sync + 'static,
{
    DeleteProductUseCase::new(state.repo.clone())
        .execute(&user, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
