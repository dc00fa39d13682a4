//! List Products Use Case

use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::application::require_owner;
use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

/// List products use case
pub struct ListProductsUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> ListProductsUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The caller's products, newest first
    pub async fn execute(&self, user: &CurrentUser) -> CatalogResult<Vec<Product>> {
        let owner_id = require_owner(user)?;
        self.repo.list_by_owner(&owner_id).await
    }
}
