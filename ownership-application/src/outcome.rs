//! 对外结果（Outcome）
//!
//! 应用层交给 HTTP 层的最终值：状态码、可选跳转位置、响应体或字段错误。
//! 不绑定任何 Web 框架。
//!
use ownership_domain::authorization::Redirect;
use ownership_domain::validation::ValidationErrors;
use serde::Serialize;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_INTERNAL: u16 = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl Outcome {
    fn status_only(status: u16) -> Self {
        Self {
            status,
            location: None,
            body: None,
            errors: None,
        }
    }

    /// 200，响应体为序列化后的 DTO
    pub fn ok<T: Serialize>(dto: &T) -> Self {
        match serde_json::to_value(dto) {
            Ok(body) => Self {
                body: Some(body),
                ..Self::status_only(STATUS_OK)
            },
            Err(err) => Self::internal(err.to_string()),
        }
    }

    pub fn redirect(redirect: Redirect) -> Self {
        Self {
            location: Some(redirect.location),
            ..Self::status_only(redirect.status)
        }
    }

    pub fn unprocessable(errors: ValidationErrors) -> Self {
        Self {
            errors: Some(errors),
            ..Self::status_only(STATUS_UNPROCESSABLE)
        }
    }

    pub fn not_found() -> Self {
        Self::status_only(STATUS_NOT_FOUND)
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self {
            body: Some(serde_json::json!({ "error": reason.into() })),
            ..Self::status_only(STATUS_INTERNAL)
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

impl From<Redirect> for Outcome {
    fn from(redirect: Redirect) -> Self {
        Self::redirect(redirect)
    }
}
