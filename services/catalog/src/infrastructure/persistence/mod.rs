//! 持久化层模块

pub mod category_repository;
pub mod migrations;
pub mod product_repository;

pub use category_repository::{CATEGORY_SORT, PostgresCategoryRepository};
pub use migrations::catalog_migrations;
pub use product_repository::{PRODUCT_SORT, PostgresProductRepository};

use catalog_common::PageRequest;
use catalog_ports::{DataAccessError, DataAccessResult};

/// 分页请求转换为 LIMIT / OFFSET 绑定值
fn limit_offset(request: &PageRequest) -> DataAccessResult<(i64, i64)> {
    let limit = i64::try_from(request.limit())
        .map_err(|_| DataAccessError::InvalidQuery("page size out of range".to_string()))?;
    let offset = i64::try_from(request.offset())
        .map_err(|_| DataAccessError::InvalidQuery("page offset out of range".to_string()))?;
    Ok((limit, offset))
}

fn row_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
