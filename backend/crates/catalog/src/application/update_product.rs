//! Update Product Use Case
//!
//! Full replacement: every editable field is taken from the input, so an
//! omitted description clears the stored one.

use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::application::{ProductInput, resolve_target};
use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// Update product use case
pub struct UpdateProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        product_id: &str,
        input: ProductInput,
    ) -> CatalogResult<Product> {
        let (owner_id, product_id) = resolve_target(user, product_id)?;
        let details = input.into_details()?;

        let product = self
            .repo
            .update(&owner_id, &product_id, &details)
            .await?
            .ok_or(CatalogError::NotFound)?;

        tracing::info!(product_id = %product.product_id, "Product updated");

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CreateProductUseCase;
    use crate::application::tests::{caller, repo, widget};

    #[tokio::test]
    async fn test_replaces_all_fields() {
        let repo = repo();
        let (user, _) = caller();
        let created = CreateProductUseCase::new(repo.clone())
            .execute(&user, widget())
            .await
            .unwrap();

        let input = ProductInput {
            name: "Gadget".to_string(),
            description: None,
            price: "12".to_string(),
            stock: 0,
        };
        let updated = UpdateProductUseCase::new(repo)
            .execute(&user, &created.product_id.to_string(), input)
            .await
            .unwrap();

        assert_eq!(updated.product_id, created.product_id);
        assert_eq!(updated.details.name.as_str(), "Gadget");
        assert_eq!(updated.details.description, None);
        assert_eq!(updated.details.price.to_string(), "12.00");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_other_user_cannot_update() {
        let repo = repo();
        let (alice, _) = caller();
        let (bob, _) = caller();
        let created = CreateProductUseCase::new(repo.clone())
            .execute(&alice, widget())
            .await
            .unwrap();

        let input = ProductInput {
            name: "Hijacked".to_string(),
            ..widget()
        };
        let err = UpdateProductUseCase::new(repo.clone())
            .execute(&bob, &created.product_id.to_string(), input)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));

        let unchanged = repo
            .find_by_id(&created.owner_id, &created.product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.details.name.as_str(), "Widget");
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let (user, _) = caller();
        let err = UpdateProductUseCase::new(repo())
            .execute(&user, &kernel::id::ProductId::new().to_string(), widget())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }
}
