//! API 层模块

pub mod rest;

pub use rest::{PaginationSettings, catalog_routes, resource_routes};
