use bon::Builder;
use ownership_domain::identity::Identity;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息：
/// - 当前身份（`identity`）：由外部认证协作方提供，`None` 表示访客；
///   身份随上下文显式传入每个处理器，不存在全局的“当前用户”；
/// - 关联 ID（`correlation_id`）：记录在每个处理器的 tracing span 上。
///
/// 典型用法：
/// ```rust
/// use ownership_application::context::AppContext;
/// use ownership_domain::identity::{Identity, UserId};
///
/// let ctx = AppContext::builder()
///     .identity(Identity::new(UserId::generate()))
///     .correlation_id("cor-123")
///     .build();
/// assert!(ctx.identity().is_some());
///
/// let guest = AppContext::guest();
/// assert!(guest.identity().is_none());
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    identity: Option<Identity>,
    #[builder(into)]
    correlation_id: Option<String>,
}

impl AppContext {
    /// 未认证访客
    pub fn guest() -> Self {
        Self::default()
    }

    /// 以给定身份登录
    pub fn signed_in(identity: Identity) -> Self {
        Self::builder().identity(identity).build()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// 日志中的操作主体
    pub fn actor(&self) -> String {
        match &self.identity {
            Some(identity) => identity.to_string(),
            None => "guest".to_string(),
        }
    }
}
