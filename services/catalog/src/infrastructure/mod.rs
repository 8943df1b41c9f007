//! 基础设施层

pub mod persistence;

pub use persistence::{PostgresCategoryRepository, PostgresProductRepository, catalog_migrations};
