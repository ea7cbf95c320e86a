//! Database connection management and PostgreSQL repositories.

mod connections;
mod postgres_base;
pub mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseHandle};
pub use sea_orm::DbErr;
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresMediaRepository,
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
