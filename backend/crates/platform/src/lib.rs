//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B length rules)
//! - Session token signing and verification (HS256 JWT)
//! - Cookie management
//! - Client identification and per-client rate limiting
//! - Outbound mail transport

pub mod client;
pub mod cookie;
pub mod mail;
pub mod password;
pub mod rate_limit;
pub mod token;
