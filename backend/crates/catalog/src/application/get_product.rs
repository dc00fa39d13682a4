//! Get Product Use Case

use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::application::resolve_target;
use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// Get product use case
pub struct GetProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> GetProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user: &CurrentUser, product_id: &str) -> CatalogResult<Product> {
        let (owner_id, product_id) = resolve_target(user, product_id)?;

        self.repo
            .find_by_id(&owner_id, &product_id)
            .await?
            .ok_or(CatalogError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CreateProductUseCase;
    use crate::application::tests::{caller, repo, widget};

    #[tokio::test]
    async fn test_owner_reads_product() {
        let repo = repo();
        let (user, _) = caller();
        let created = CreateProductUseCase::new(repo.clone())
            .execute(&user, widget())
            .await
            .unwrap();

        let found = GetProductUseCase::new(repo)
            .execute(&user, &created.product_id.to_string())
            .await
            .unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_other_user_gets_not_found() {
        let repo = repo();
        let (alice, _) = caller();
        let (bob, _) = caller();
        let created = CreateProductUseCase::new(repo.clone())
            .execute(&alice, widget())
            .await
            .unwrap();

        let err = GetProductUseCase::new(repo)
            .execute(&bob, &created.product_id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let (user, _) = caller();
        let err = GetProductUseCase::new(repo())
            .execute(&user, "12")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }
}
