//! 目录领域模型

pub mod category;
pub mod product;

pub use category::{Category, CategoryDraft};
pub use product::{Product, ProductDraft};
