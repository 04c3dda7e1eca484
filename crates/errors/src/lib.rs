//! docsearch-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::Mapping(msg.into())
    }

    pub fn external_service(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 是否为参数错误（调用方编程错误，不应重试）
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// 是否可重试
    ///
    /// 只有搜索引擎侧的瞬时故障可以重试，其余错误会原样返回给调用方
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ExternalService(msg) => {
                let msg = msg.to_lowercase();
                RETRYABLE_PATTERNS.iter().any(|p| msg.contains(p))
            }
            _ => false,
        }
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) => 400,
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Mapping(_) => 500,
            Self::ExternalService(_) => 502,
            Self::Internal(_) => 500,
        }
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            r#type: format!("https://docsearch.dev/problems/{}", self.problem_slug()),
            title: self.problem_title().to_string(),
            status: self.status_code(),
            detail: self.to_string(),
            instance: None,
        }
    }

    fn problem_slug(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid-argument",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not-found",
            Self::Conflict(_) => "conflict",
            Self::Mapping(_) => "mapping",
            Self::ExternalService(_) => "external-service",
            Self::Internal(_) => "internal",
        }
    }

    fn problem_title(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "Invalid Argument",
            Self::Validation(_) => "Validation Error",
            Self::NotFound(_) => "Resource Not Found",
            Self::Conflict(_) => "Conflict",
            Self::Mapping(_) => "Document Mapping Error",
            Self::ExternalService(_) => "External Service Error",
            Self::Internal(_) => "Internal Server Error",
        }
    }
}

/// 搜索引擎瞬时故障的错误特征
const RETRYABLE_PATTERNS: &[&str] = &[
    "connection refused",
    "connection reset",
    "connection closed",
    "timed out",
    "timeout",
    "temporarily unavailable",
    "too many requests",
    "es_rejected_execution_exception",
    "no shard available",
    "cluster_block_exception",
    "broken pipe",
];

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Mapping(err.to_string())
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_status() {
        let err = AppError::invalid_argument("Pagination must not be absent");
        assert!(err.is_invalid_argument());
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_string(),
            "Invalid argument: Pagination must not be absent"
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(AppError::external_service("Connection refused by node-1").is_retryable());
        assert!(AppError::external_service("es_rejected_execution_exception").is_retryable());
        assert!(!AppError::external_service("index_not_found_exception").is_retryable());
        assert!(!AppError::invalid_argument("timeout").is_retryable());
    }

    #[test]
    fn test_problem_details() {
        let details = AppError::not_found("document 42").to_problem_details();
        assert_eq!(details.status, 404);
        assert_eq!(details.title, "Resource Not Found");
        assert!(details.r#type.ends_with("/not-found"));

        let json = serde_json::to_value(&details).unwrap();
        assert!(json.get("instance").is_none());
    }

    #[test]
    fn test_from_serde_error() {
        let err: AppError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, AppError::Mapping(_)));
    }
}
