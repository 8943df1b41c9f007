//! 应用层模块

pub mod assembler;
pub mod dto;
pub mod service;

pub use assembler::{CategoryMapper, ProductMapper, ResourceMapper};
pub use dto::{CategoryDto, CategoryRefDto, Identified, ProductDto};
pub use service::{CrudService, ResourceService, classify_data_access_error};
