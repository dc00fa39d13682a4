//! Value Objects
//!
//! Each constructor enforces its own invariant, so a constructed value is
//! always storable.

pub mod price;
pub mod product_name;
pub mod stock;
