//! HTTP 错误响应

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_errors::{AppError, AppResult};
use tracing::{debug, error};

/// 携带请求路径的应用错误
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    path: String,
}

impl ApiError {
    pub fn new(error: AppError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.error.is_server_error() {
            error!(path = %self.path, error = %self.error, "Request failed");
        } else {
            debug!(path = %self.path, error = %self.error, "Request rejected");
        }

        (status, Json(self.error.to_standard_error(self.path))).into_response()
    }
}

/// 为结果附加请求路径
pub trait AtPath<T> {
    fn at(self, path: &str) -> Result<T, ApiError>;
}

impl<T> AtPath<T> for AppResult<T> {
    fn at(self, path: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, path))
    }
}
