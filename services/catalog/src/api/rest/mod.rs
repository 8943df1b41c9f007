//! REST 接口

pub mod error;
pub mod handlers;
pub mod pagination;
pub mod routes;

pub use error::ApiError;
pub use handlers::ResourceState;
pub use pagination::{PaginationSettings, parse_page_request};
pub use routes::{catalog_routes, resource_routes};
