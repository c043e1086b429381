//! 领域层统一错误定义
//!
//! 授权拒绝（`AccessDenied`）与字段校验失败（`ValidationErrors`）属于
//! 可预期的判定结果，分别定义在 `authorization` 与 `validation` 中；
//! 这里只收敛仓储写入相关的错误。
//!
use crate::identity::UserId;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("unique violation: owner={owner}, name={name}")]
    UniqueViolation { owner: UserId, name: String },
    #[error("version conflict: expected={expected}, actual={actual}")]
    VersionConflict { expected: usize, actual: usize },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
