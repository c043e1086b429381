//! 身份（Identity）
//!
//! 已认证的操作主体，由外部认证协作方在每次请求中提供；
//! 未认证的访客以 `Option<Identity>::None` 表示，不另设类型。
//!
use ownership_macros::{entity_id, value_object};
use std::fmt;
use uuid::Uuid;

/// 用户标识
#[entity_id]
pub struct UserId(Uuid);

/// 已认证身份
#[value_object]
#[derive(Copy, Hash)]
pub struct Identity {
    id: UserId,
}

impl Identity {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> UserId {
        self.id
    }
}

impl From<UserId> for Identity {
    fn from(id: UserId) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.id)
    }
}
