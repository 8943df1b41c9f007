//! 数据库错误映射工具
//!
//! 将 SQLx 错误归类为 `DataAccessError`，业务含义留给服务层判断

use catalog_ports::DataAccessError;

/// PostgreSQL 约束违规代码（SQLSTATE class 23）
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";
const NOT_NULL_VIOLATION: &str = "23502";

/// 将 SQLx 错误转换为 DataAccessError
pub fn map_sqlx_error(e: sqlx::Error) -> DataAccessError {
    match e {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => DataAccessError::IntegrityViolation(format!(
                "foreign key constraint {} violated",
                db_err.constraint().unwrap_or("<unknown>")
            )),
            Some(UNIQUE_VIOLATION) => {
                DataAccessError::IntegrityViolation("duplicate entry violates unique constraint".to_string())
            }
            Some(CHECK_VIOLATION) => {
                DataAccessError::IntegrityViolation("check constraint violation".to_string())
            }
            Some(NOT_NULL_VIOLATION) => {
                DataAccessError::IntegrityViolation("not null constraint violation".to_string())
            }
            Some(code) => DataAccessError::Other(format!("database error ({code}): {db_err}")),
            None => DataAccessError::Other(db_err.to_string()),
        },
        sqlx::Error::PoolTimedOut => {
            DataAccessError::Unavailable("database connection pool timeout".to_string())
        }
        sqlx::Error::PoolClosed => {
            DataAccessError::Unavailable("database connection pool is closed".to_string())
        }
        sqlx::Error::Io(io) => DataAccessError::Unavailable(format!("database io error: {io}")),
        sqlx::Error::Protocol(msg) => {
            DataAccessError::Other(format!("database protocol error: {msg}"))
        }
        other => DataAccessError::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DataAccessError::Unavailable(_)));
    }

    #[test]
    fn test_pool_closed() {
        let err = map_sqlx_error(sqlx::Error::PoolClosed);
        assert!(matches!(err, DataAccessError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_not_classified() {
        // 行不存在由仓储根据上下文转换为 AbsentIdentifier
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, DataAccessError::Other(_)));
    }

    #[test]
    fn test_protocol_error() {
        let err = map_sqlx_error(sqlx::Error::Protocol("unexpected message".to_string()));
        match err {
            DataAccessError::Other(msg) => assert!(msg.contains("unexpected message")),
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
