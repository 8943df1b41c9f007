//! catalog-adapter-postgres - PostgreSQL 适配器

mod connection;
mod error_mapper;
mod migration;
mod ordering;

pub use connection::*;
pub use error_mapper::*;
pub use migration::*;
pub use ordering::*;
