//! Repository trait 定义

use async_trait::async_trait;
use catalog_common::PageRequest;
use thiserror::Error;

/// 数据访问失败
///
/// 只描述存储层发生了什么，由服务层决定其业务含义
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// 目标 ID 不存在
    #[error("no row with id {0}")]
    AbsentIdentifier(i64),

    /// 写入时引用的其他实体不存在
    #[error("referenced {resource} with id {id} does not exist")]
    MissingReference { resource: &'static str, id: i64 },

    /// 违反引用或唯一约束
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    /// 请求无法被存储层执行（如非法排序字段）
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// 连接池、网络等不可用
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

pub type DataAccessResult<T> = Result<T, DataAccessError>;

/// 通用 CRUD Repository
///
/// `E` 为持久化实体，`D` 为写入草稿（不含系统分配的 ID 与创建时间）
#[async_trait]
pub trait CrudRepository<E, D>: Send + Sync
where
    E: Send + Sync,
    D: Send + Sync,
{
    /// 根据 ID 查找
    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<E>>;

    /// 检查是否存在
    async fn exists(&self, id: i64) -> DataAccessResult<bool>;

    /// 分页查询，返回当前页与全部记录数
    async fn find_page(&self, request: &PageRequest) -> DataAccessResult<(Vec<E>, u64)>;

    /// 插入新实体，ID 由存储层分配
    ///
    /// 引用的实体不存在时返回 `MissingReference`
    async fn insert(&self, draft: &D) -> DataAccessResult<E>;

    /// 原地更新，ID 与创建时间保持不变
    ///
    /// ID 不存在时返回 `AbsentIdentifier`，引用的实体不存在时返回 `MissingReference`
    async fn update(&self, id: i64, draft: &D) -> DataAccessResult<E>;

    /// 根据 ID 删除
    ///
    /// ID 不存在时返回 `AbsentIdentifier`，被引用时返回 `IntegrityViolation`
    async fn delete_by_id(&self, id: i64) -> DataAccessResult<()>;

    /// 统计总数
    async fn count(&self) -> DataAccessResult<u64>;
}
