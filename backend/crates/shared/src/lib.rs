//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Common primitive value objects (ID types, etc.)
//! - The request-scoped identity handed from the auth gate to resource handlers
//! - The JSON response envelope shared by every HTTP surface
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod identity;

#[cfg(feature = "axum")]
pub mod extract;
#[cfg(feature = "axum")]
pub mod response;
