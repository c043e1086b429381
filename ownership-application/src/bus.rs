//! 命令/查询总线
//!
//! - 负责根据消息的具体类型路由到对应的处理器；
//! - 带有泛型方法，通常以具体实现类型注入使用（见 `inmemory_bus`）。
//!
use crate::{command::Command, context::AppContext, error::AppError, query::Query};
use async_trait::async_trait;

#[async_trait]
pub trait CommandBus: Send + Sync {
    /// 分发命令到对应处理器
    async fn dispatch<C: Command>(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError>;
}

#[async_trait]
pub trait QueryBus: Send + Sync {
    /// 分发查询到对应处理器，返回该查询的 DTO
    async fn dispatch<Q: Query>(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError>;
}
