//! Delete Product Use Case

use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::application::resolve_target;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// Delete product use case
pub struct DeleteProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user: &CurrentUser, product_id: &str) -> CatalogResult<()> {
        let (owner_id, product_id) = resolve_target(user, product_id)?;

        if !self.repo.delete(&owner_id, &product_id).await? {
            return Err(CatalogError::NotFound);
        }

        tracing::info!(product_id = %product_id, "Product deleted");

        Ok(())
    }
}
