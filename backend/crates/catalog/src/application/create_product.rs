//! Create Product Use Case

use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::application::{ProductInput, require_owner};
use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

/// Create product use case
pub struct CreateProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> CreateProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user: &CurrentUser, input: ProductInput) -> CatalogResult<Product> {
        let owner_id = require_owner(user)?;
        let details = input.into_details()?;

        let product = Product::new(owner_id, details);
        self.repo.create(&product).await?;

        tracing::info!(
            product_id = %product.product_id,
            owner_id = %owner_id,
            "Product created"
        );

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tests::{caller, repo, widget};
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_create_assigns_owner() {
        let repo = repo();
        let (user, owner) = caller();

        let product = CreateProductUseCase::new(repo.clone())
            .execute(&user, widget())
            .await
            .unwrap();

        assert_eq!(product.owner_id, owner);
        assert_eq!(product.details.price.to_string(), "9.99");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_subject_is_forbidden() {
        let repo = repo();
        let err = CreateProductUseCase::new(repo.clone())
            .execute(&CurrentUser::new("not-a-uuid"), widget())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Forbidden));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_stored() {
        let repo = repo();
        let (user, _) = caller();
        let input = ProductInput {
            stock: -1,
            ..widget()
        };

        let err = CreateProductUseCase::new(repo.clone())
            .execute(&user, input)
            .await
            .unwrap_err();

        assert_eq!(err.status_code().as_u16(), 422);
        assert!(repo.is_empty());
    }
}
