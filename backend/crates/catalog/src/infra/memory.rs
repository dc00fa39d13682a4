//! In-Memory Repository Implementations

use std::sync::{Arc, RwLock};

use kernel::id::{ProductId, UserId};

use crate::domain::entity::product::{Product, ProductDetails};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// In-memory product repository
///
/// Products are kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products across all owners
    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> CatalogError {
        CatalogError::Internal("product store lock poisoned".to_string())
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        products.push(product.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        owner_id: &UserId,
        product_id: &ProductId,
    ) -> CatalogResult<Option<Product>> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        Ok(products
            .iter()
            .find(|p| &p.product_id == product_id && p.is_owned_by(owner_id))
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;

        // Later inserts win ties on created_at
        let mut owned: Vec<Product> = products
            .iter()
            .rev()
            .filter(|p| p.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned)
    }

    async fn update(
        &self,
        owner_id: &UserId,
        product_id: &ProductId,
        details: &ProductDetails,
    ) -> CatalogResult<Option<Product>> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;

        let Some(product) = products
            .iter_mut()
            .find(|p| &p.product_id == product_id && p.is_owned_by(owner_id))
        else {
            return Ok(None);
        };

        product.replace_details(details.clone());
        Ok(Some(product.clone()))
    }

    async fn delete(&self, owner_id: &UserId, product_id: &ProductId) -> CatalogResult<bool> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        let before = products.len();
        products.retain(|p| !(&p.product_id == product_id && p.is_owned_by(owner_id)));
        Ok(products.len() < before)
    }
}
