//! Infrastructure Layer
//!
//! Storage implementations of [`ProductRepository`](crate::domain::repository::ProductRepository).

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;
