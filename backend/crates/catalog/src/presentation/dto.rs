//! API DTOs (Data Transfer Objects)

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::application::ProductInput;
use crate::domain::entity::product::Product;
use crate::domain::value_object::{price::Price, product_name::ProductName, stock::Stock};

// ============================================================================
// Request
// ============================================================================

/// Create and update request body
///
/// `price` may be sent as a JSON string (`"9.99"`) or number (`9.99`); either
/// way it is kept as decimal text. A missing `stock` means zero.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "decimal_text")]
    #[validate(custom(function = "validate_price"))]
    pub price: String,
    #[serde(default)]
    #[validate(custom(function = "validate_stock"))]
    pub stock: i64,
}

impl From<ProductRequest> for ProductInput {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalText {
    Text(String),
    Number(serde_json::Number),
}

fn decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<DecimalText>::deserialize(deserializer)? {
        Some(DecimalText::Text(text)) => text,
        Some(DecimalText::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    ProductName::new(name)
        .map(drop)
        .map_err(|e| field_error("name", e.to_string()))
}

fn validate_price(price: &str) -> Result<(), ValidationError> {
    Price::parse(price)
        .map(drop)
        .map_err(|e| field_error("price", e.to_string()))
}

fn validate_stock(stock: i64) -> Result<(), ValidationError> {
    Stock::new(stock)
        .map(drop)
        .map_err(|e| field_error("stock", e.to_string()))
}

// ============================================================================
// Response
// ============================================================================

/// Product as returned to its owner
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Decimal text with two places, e.g. `"9.99"`
    pub price: Price,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.product_id.to_string(),
            user_id: product.owner_id.to_string(),
            name: product.details.name.to_string(),
            description: product.details.description,
            price: product.details.price,
            stock: product.details.stock.value(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> ProductRequest {
        serde_json::from_str(json).unwrap()
    }

    fn messages(req: &ProductRequest) -> Vec<(String, String)> {
        let errors = req.validate().unwrap_err();
        let mut out: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|e| (field.to_string(), e.message.clone().unwrap().to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_price_as_string_or_number() {
        assert_eq!(request(r#"{"name":"W","price":"9.99"}"#).price, "9.99");
        assert_eq!(request(r#"{"name":"W","price":9.99}"#).price, "9.99");
        assert_eq!(request(r#"{"name":"W","price":3}"#).price, "3");
        assert_eq!(request(r#"{"name":"W","price":null}"#).price, "");
    }

    #[test]
    fn test_stock_defaults_to_zero() {
        let req = request(r#"{"name":"W","price":"1"}"#);
        assert_eq!(req.stock, 0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        assert_eq!(
            messages(&request("{}")),
            vec![
                ("name".to_string(), "name is required".to_string()),
                ("price".to_string(), "price is required".to_string()),
            ]
        );
    }

    #[test]
    fn test_out_of_range_values() {
        let req = request(r#"{"name":"W","price":"1.999","stock":-1}"#);
        assert_eq!(
            messages(&req),
            vec![
                (
                    "price".to_string(),
                    "must have at most 2 decimal places".to_string()
                ),
                ("stock".to_string(), "must be at least 0".to_string()),
            ]
        );
    }

    #[test]
    fn test_response_shape() {
        let details =
            crate::domain::ProductDetails::parse("Widget", None, "9.99", 3).unwrap();
        let product = Product::new(kernel::id::UserId::new(), details);
        let json = serde_json::to_value(ProductResponse::from(product.clone())).unwrap();

        assert_eq!(json["id"], product.product_id.to_string());
        assert_eq!(json["user_id"], product.owner_id.to_string());
        assert_eq!(json["price"], "9.99");
        assert_eq!(json["stock"], 3);
        assert!(json["description"].is_null());
    }
}
