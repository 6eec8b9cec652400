//! 统一错误处理
//!
//! Every handler returns [`AppResult`]. The response body is always a single
//! JSON string: the human-readable message.
//!
//! | 变体 | 状态码 |
//! |------|--------|
//! | Validation / Invalid | 400 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Database | 500 |
//!
//! ```ignore
//! return Err(AppError::not_found("employee not found"));
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ValidationError;
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    /// 字段校验失败 (400)
    Validation(#[from] ValidationError),

    #[error("{0}")]
    /// 无效请求 (400)
    Invalid(String),

    #[error("{0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("{0}")]
    /// 资源冲突 (409)
    Conflict(String),

    /// 存储错误 (500): `message` is returned, `detail` is only logged
    #[error("{message}: {detail}")]
    Database { message: String, detail: String },
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Store failure reported to the client as `message`
    pub fn database(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::Database {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Database { message, detail } => {
                error!(error = %detail, "{message}");
                message
            }
            other => other.to_string(),
        };

        (status, Json(message)).into_response()
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = ValidationError {
            field: "Salary",
            message: "salary cannot be ZERO. Enter salary again",
        };
        assert_eq!(AppError::from(validation).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::invalid("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::database("x", "boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = AppError::from(ValidationError {
            field: "Phone Number",
            message: "phone number must be 10 digits long",
        });
        assert_eq!(err.to_string(), "Phone Number: phone number must be 10 digits long");
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let response = AppError::database("Failed to retrieve employees", "connection reset")
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let message: String = serde_json::from_slice(&body).unwrap();
        assert_eq!(message, "Failed to retrieve employees");
    }
}
