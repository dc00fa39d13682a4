//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::product::{Product, ProductDetails};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{price::Price, product_name::ProductName, stock::Stock};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id,
                user_id,
                name,
                description,
                price,
                stock,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(product.owner_id.as_uuid())
        .bind(product.details.name.as_str())
        .bind(product.details.description.as_deref())
        .bind(product.details.price.amount())
        .bind(product.details.stock.value())
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        owner_id: &UserId,
        product_id: &ProductId,
    ) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                user_id,
                name,
                description,
                price,
                stock,
                created_at,
                updated_at
            FROM products
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(product_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                user_id,
                name,
                description,
                price,
                stock,
                created_at,
                updated_at
            FROM products
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn update(
        &self,
        owner_id: &UserId,
        product_id: &ProductId,
        details: &ProductDetails,
    ) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET
                name = $3,
                description = $4,
                price = $5,
                stock = $6,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING
                id,
                user_id,
                name,
                description,
                price,
                stock,
                created_at,
                updated_at
            "#,
        )
        .bind(product_id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(details.name.as_str())
        .bind(details.description.as_deref())
        .bind(details.price.amount())
        .bind(details.stock.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn delete(&self, owner_id: &UserId, product_id: &ProductId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(product_id.as_uuid())
            .bind(owner_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> CatalogResult<Product> {
        let price = Price::new(self.price)
            .map_err(|e| CatalogError::Internal(format!("Invalid stored price: {}", e)))?;

        Ok(Product {
            product_id: ProductId::from_uuid(self.id),
            owner_id: UserId::from_uuid(self.user_id),
            details: ProductDetails {
                name: ProductName::from_db(self.name),
                description: self.description,
                price,
                stock: Stock::from_db(self.stock),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
