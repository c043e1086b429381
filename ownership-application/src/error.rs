//! 应用层错误
//!
//! 汇总授权拒绝、字段校验、领域/仓储错误与总线注册错误，
//! 并通过 [`AppError::into_outcome`] 映射为对外的 [`Outcome`]。
//!
use crate::outcome::Outcome;
use ownership_domain::authorization::{AccessDenied, InvalidGuardConfig, OwnershipGuard};
use ownership_domain::error::DomainError;
use ownership_domain::validation::{NAME_FIELD, ValidationErrorKind, ValidationErrors};

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("access denied: {0}")]
    Access(#[from] AccessDenied),

    #[error("validation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("domain: {0}")]
    Domain(DomainError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] InvalidGuardConfig),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}, result={result}")]
    AlreadyRegisteredQuery {
        query: &'static str,
        result: &'static str,
    },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            // 存储层唯一约束与校验器给出相同的字段错误
            DomainError::UniqueViolation { .. } => AppError::Validation(ValidationErrors::single(
                NAME_FIELD,
                ValidationErrorKind::DuplicateName,
            )),
            DomainError::NotFound { reason } => AppError::NotFound(reason),
            other => AppError::Domain(other),
        }
    }
}

impl AppError {
    /// 映射为对外结果
    ///
    /// - 未认证 → 302 登录页；无权 → 302 根路径；
    /// - 校验失败 → 422 并携带字段错误；
    /// - 不存在 → 404；其余 → 500。
    pub fn into_outcome(self, guard: &OwnershipGuard) -> Outcome {
        match self {
            AppError::Access(denied) => Outcome::from(guard.redirect_for(&denied)),
            AppError::Validation(errors) => Outcome::unprocessable(errors),
            AppError::NotFound(_) => Outcome::not_found(),
            other => Outcome::internal(other.to_string()),
        }
    }
}
