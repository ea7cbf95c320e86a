//! # Quill Core
//!
//! The domain layer of the Quill blog backend: entities, the slug and
//! change-detection algorithms, the image-URL policy, and the ports that
//! infrastructure implements. No infrastructure dependencies.

pub mod change;
pub mod domain;
pub mod error;
pub mod image;
pub mod ports;
pub mod slug;

pub use error::DomainError;
