//! ports - 抽象 trait 层
//!
//! 定义数据访问层的抽象接口

mod repository;

pub use repository::*;
