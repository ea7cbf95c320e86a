//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL repositories via SeaORM, JWT tokens, Argon2 password
//! hashing, and the in-memory cache.

pub mod auth;
pub mod cache;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use cache::InMemoryCache;
pub use database::{DatabaseConfig, DatabaseHandle};
