//! 所有权守卫（OwnershipGuard）
//!
//! 对单个资源的 查看/更新/删除，以及 列表/创建 做准入判定：
//! - 未提供身份（访客）→ `AccessDenied::Unauthenticated`
//! - 有身份但不是所有者 → `AccessDenied::Forbidden`
//! - 其余放行
//!
//! 判定只比较身份标识，没有角色层级、管理员豁免或共享列表。
//! 守卫不修改资源或身份；拒绝结果由 `redirect_for` 映射为外部层使用的跳转。
//!
use crate::identity::{Identity, UserId};
use crate::ownership::Owned;
use crate::value_object::ValueObject;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_SIGN_IN_PATH: &str = "/users/sign_in";
pub const DEFAULT_ROOT_PATH: &str = "/";
pub const DEFAULT_PROJECTS_PATH: &str = "/projects";

/// 302 Found
pub const REDIRECT_STATUS: u16 = 302;

/// 针对单个资源的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    View,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::View => "view",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// 拒绝原因（可预期的判定值，而非故障）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden: actor={actor} may not {operation} a resource owned by {owner}")]
    Forbidden {
        actor: UserId,
        owner: UserId,
        operation: Operation,
    },
}

/// 判定结果：放行时携带 `T`，拒绝时携带原因
pub type Decision<T = ()> = Result<T, AccessDenied>;

/// 拒绝后交给外部层的跳转
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: String,
    pub status: u16,
}

impl Redirect {
    pub fn found(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: REDIRECT_STATUS,
        }
    }
}

/// 守卫配置：各类跳转目标
///
/// 可由宿主以 JSON 等格式反序列化，缺省字段取默认值：
/// ```
/// use ownership_domain::authorization::GuardConfig;
///
/// let cfg: GuardConfig = serde_json::from_str(r#"{ "root_path": "/dashboard" }"#).unwrap();
/// assert_eq!(cfg.root_path(), "/dashboard");
/// assert_eq!(cfg.sign_in_path(), "/users/sign_in");
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// 未认证时的跳转目标
    #[builder(into, default = DEFAULT_SIGN_IN_PATH.to_string())]
    sign_in_path: String,
    /// 无权访问时的跳转目标
    #[builder(into, default = DEFAULT_ROOT_PATH.to_string())]
    root_path: String,
    /// 项目资源的根路径（写操作成功后的跳转基准）
    #[builder(into, default = DEFAULT_PROJECTS_PATH.to_string())]
    projects_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GuardConfig {
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn projects_path(&self) -> &str {
        &self.projects_path
    }
}

/// 配置校验失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid guard config: {field} must be an absolute path, got {value:?}")]
pub struct InvalidGuardConfig {
    pub field: &'static str,
    pub value: String,
}

impl ValueObject for GuardConfig {
    type Error = InvalidGuardConfig;

    fn validate(&self) -> Result<(), Self::Error> {
        for (field, value) in [
            ("sign_in_path", &self.sign_in_path),
            ("root_path", &self.root_path),
            ("projects_path", &self.projects_path),
        ] {
            if !value.starts_with('/') {
                return Err(InvalidGuardConfig {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// 所有权守卫
#[derive(Debug, Clone, Default)]
pub struct OwnershipGuard {
    config: GuardConfig,
}

impl OwnershipGuard {
    /// 使用经过校验的配置创建守卫
    pub fn new(config: GuardConfig) -> Result<Self, InvalidGuardConfig> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// 要求存在已认证身份
    pub fn authenticate<'a>(&self, identity: Option<&'a Identity>) -> Decision<&'a Identity> {
        identity.ok_or(AccessDenied::Unauthenticated)
    }

    /// 创建：任何已认证身份都可以创建（并成为所有者）
    pub fn authorize_create<'a>(&self, identity: Option<&'a Identity>) -> Decision<&'a Identity> {
        self.authenticate(identity)
    }

    /// 列表：任何已认证身份都可以列出自己的项目
    pub fn authorize_list<'a>(&self, identity: Option<&'a Identity>) -> Decision<&'a Identity> {
        self.authenticate(identity)
    }

    /// 针对单个资源的 查看/更新/删除
    pub fn authorize_on_resource<R>(
        &self,
        identity: Option<&Identity>,
        resource: &R,
        operation: Operation,
    ) -> Decision
    where
        R: Owned + ?Sized,
    {
        let actor = self.authenticate(identity)?.id();
        if !resource.is_owned_by(&actor) {
            return Err(AccessDenied::Forbidden {
                actor,
                owner: *resource.owner_id(),
                operation,
            });
        }
        Ok(())
    }

    /// 拒绝原因 → 跳转（均为 302）
    pub fn redirect_for(&self, denied: &AccessDenied) -> Redirect {
        match denied {
            AccessDenied::Unauthenticated => Redirect::found(self.config.sign_in_path()),
            AccessDenied::Forbidden { .. } => Redirect::found(self.config.root_path()),
        }
    }
}
