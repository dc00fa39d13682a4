//! Domain Layer
//!
//! Contains the product entity, value objects, and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::product::{Product, ProductDetails};
pub use repository::ProductRepository;
