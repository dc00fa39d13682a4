//! Product Entity
//!
//! Inventory item owned by exactly one user.

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult, FieldError};
use kernel::id::{ProductId, UserId};

use crate::domain::value_object::{price::Price, product_name::ProductName, stock::Stock};

/// Client-editable part of a product
///
/// Create and update both submit the full set, so both go through
/// [`ProductDetails::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub name: ProductName,
    /// `None` when absent or empty
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
}

impl ProductDetails {
    /// Validate raw field values, reporting every failing field at once
    pub fn parse(
        name: &str,
        description: Option<&str>,
        price: &str,
        stock: i64,
    ) -> AppResult<Self> {
        let mut fields = Vec::new();

        let name = ProductName::new(name)
            .map_err(|e| fields.push(FieldError::new("name", e.to_string())))
            .ok();
        let price = Price::parse(price)
            .map_err(|e| fields.push(FieldError::new("price", e.to_string())))
            .ok();
        let stock = Stock::new(stock)
            .map_err(|e| fields.push(FieldError::new("stock", e.to_string())))
            .ok();

        match (name, price, stock) {
            (Some(name), Some(price), Some(stock)) => Ok(Self {
                name,
                description: normalize_description(description),
                price,
                stock,
            }),
            _ => Err(AppError::validation(fields)),
        }
    }
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: ProductId,
    /// Owning user, every lookup is scoped by it
    pub owner_id: UserId,
    pub details: ProductDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with a fresh id
    pub fn new(owner_id: UserId, details: ProductDetails) -> Self {
        let now = Utc::now();
        Self {
            product_id: ProductId::new(),
            owner_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field
    pub fn replace_details(&mut self, details: ProductDetails) {
        self.details = details;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, owner_id: &UserId) -> bool {
        &self.owner_id == owner_id
    }
}
