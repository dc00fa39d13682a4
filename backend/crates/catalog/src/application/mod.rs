//! Application Layer
//!
//! One use case per product operation. Each takes the caller's
//! [`CurrentUser`] and resolves it to an owner before touching the store.

pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod update_product;

use kernel::id::{ProductId, UserId};
use kernel::identity::CurrentUser;

use crate::domain::entity::product::ProductDetails;
use crate::error::{CatalogError, CatalogResult};

// Re-exports
pub use create_product::CreateProductUseCase;
pub use delete_product::DeleteProductUseCase;
pub use get_product::GetProductUseCase;
pub use list_products::ListProductsUseCase;
pub use update_product::UpdateProductUseCase;

/// Editable product fields as received
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub stock: i64,
}

impl ProductInput {
    fn into_details(self) -> CatalogResult<ProductDetails> {
        ProductDetails::parse(
            &self.name,
            self.description.as_deref(),
            &self.price,
            self.stock,
        )
        .map_err(CatalogError::from)
    }
}

/// Owner for creating or listing; a subject that is not a user id is
/// refused outright
fn require_owner(user: &CurrentUser) -> CatalogResult<UserId> {
    user.user_id().ok_or(CatalogError::Forbidden)
}

/// Owner and product for single-product operations
///
/// A malformed subject or product id cannot match any row, so it is
/// reported the same way as a missing product.
fn resolve_target(user: &CurrentUser, product_id: &str) -> CatalogResult<(UserId, ProductId)> {
    let owner_id = user.user_id().ok_or(CatalogError::NotFound)?;
    let product_id = product_id
        .parse::<ProductId>()
        .map_err(|_| CatalogError::NotFound)?;
    Ok((owner_id, product_id))
}
