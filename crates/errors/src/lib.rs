//! catalog-errors - 统一错误处理
//!
//! 错误分类由服务层负责，HTTP 状态码与错误体的映射在此集中定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// 资源 ID 不存在
    pub fn entity_not_found(resource: &str, id: i64) -> Self {
        Self::NotFound(format!("{resource} with id {id} not found"))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) | Self::Database(_) => 500,
        }
    }

    /// 是否为服务端错误（5xx）
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 错误体中的 `error` 字段
    pub fn error_title(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Resource not found",
            Self::Validation(_) => "Bad request",
            Self::Conflict(_) => "Database integrity violation",
            Self::Internal(_) => "Internal server error",
            Self::Database(_) => "Database error",
        }
    }

    /// 错误体中的 `message` 字段，只保留原因部分
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::Validation(m)
            | Self::Conflict(m)
            | Self::Internal(m)
            | Self::Database(m) => m,
        }
    }

    /// 转换为标准错误体
    pub fn to_standard_error(&self, path: impl Into<String>) -> StandardError {
        // 服务端错误不向客户端暴露底层细节
        let message = if self.is_server_error() {
            "Unexpected server error".to_string()
        } else {
            self.message().to_string()
        };

        StandardError {
            timestamp: Utc::now(),
            status: self.status_code(),
            error: self.error_title().to_string(),
            message,
            path: path.into(),
        }
    }
}

/// 标准错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardError {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::entity_not_found("Product", 7).status_code(), 404);
        assert_eq!(AppError::validation("bad page").status_code(), 400);
        assert_eq!(AppError::conflict("dependent").status_code(), 409);
        assert_eq!(AppError::database("boom").status_code(), 500);
        assert_eq!(AppError::internal("boom").status_code(), 500);
    }

    #[test]
    fn test_standard_error_body() {
        let err = AppError::entity_not_found("Category", 42);
        let body = err.to_standard_error("/categories/42");

        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Resource not found");
        assert_eq!(body.message, "Category with id 42 not found");
        assert_eq!(body.path, "/categories/42");

        let json = serde_json::to_value(&body).unwrap();
        for key in ["timestamp", "status", "error", "message", "path"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_server_error_message_is_masked() {
        let err = AppError::database("connection reset by peer");
        let body = err.to_standard_error("/products");

        assert_eq!(body.status, 500);
        assert!(!body.message.contains("connection reset"));
    }
}
