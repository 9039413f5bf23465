//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    UnsupportedMediaType(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound(format!("{} {} 不存在", entity, id))
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        CoreError::InvalidInput(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CoreError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::InvalidInput(_) => "INVALID_INPUT",
            CoreError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            CoreError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
    pub timestamp: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CoreError::Internal(detail) => {
                error!(detail = %detail, "请求处理失败");
                "服务器内部错误".to_string()
            }
            other => other.to_string(),
        };

        let error_response = ErrorResponse {
            error: message,
            code: self.code(),
            status: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Internal(err.to_string())
    }
}
