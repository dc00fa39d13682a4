//! Catalog Backend Module
//!
//! Per-user product inventory. Every product belongs to exactly one user
//! and every read or write is scoped to the caller, so a product owned by
//! someone else is indistinguishable from one that does not exist.
//!
//! Clean Architecture structure:
//! - `domain/` - Product entity, value objects, repository trait
//! - `application/` - Create / get / list / update / delete use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::InMemoryProductRepository, postgres::PgProductRepository};
pub use presentation::{CatalogAppState, catalog_router};
