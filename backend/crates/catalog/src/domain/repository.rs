//! Repository Traits
//!
//! Every method takes the owner, so cross-user access cannot be expressed.

use kernel::id::{ProductId, UserId};

use crate::domain::entity::product::{Product, ProductDetails};
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Persist a new product
    async fn create(&self, product: &Product) -> CatalogResult<()>;

    /// Find one of `owner_id`'s products
    async fn find_by_id(
        &self,
        owner_id: &UserId,
        product_id: &ProductId,
    ) -> CatalogResult<Option<Product>>;

    /// All of `owner_id`'s products, newest first
    async fn list_by_owner(&self, owner_id: &UserId) -> CatalogResult<Vec<Product>>;

    /// Replace the editable fields, returning the updated product if it exists
    async fn update(
        &self,
        owner_id: &UserId,
        product_id: &ProductId,
        details: &ProductDetails,
    ) -> CatalogResult<Option<Product>>;

    /// Delete, returning whether a row was removed
    async fn delete(&self, owner_id: &UserId, product_id: &ProductId) -> CatalogResult<bool>;
}
